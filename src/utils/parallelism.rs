//! Iteration which is parallel if the `parallel` feature is enabled and sequential otherwise.

#[cfg(feature = "parallel")]
mod imp {
    pub use rayon::iter::ParallelIterator;
    use rayon::iter::IntoParallelIterator;

    pub trait MaybeParallelIterator: IntoParallelIterator {
        fn maybe_par_iter(self) -> <Self as IntoParallelIterator>::Iter;
    }

    impl<I: IntoParallelIterator> MaybeParallelIterator for I {
        fn maybe_par_iter(self) -> <Self as IntoParallelIterator>::Iter {
            self.into_par_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
mod imp {
    pub trait MaybeParallelIterator: IntoIterator {
        fn maybe_par_iter(self) -> <Self as IntoIterator>::IntoIter;
    }

    impl<I: IntoIterator> MaybeParallelIterator for I {
        fn maybe_par_iter(self) -> <Self as IntoIterator>::IntoIter {
            self.into_iter()
        }
    }
}

pub use imp::*;

//! Per-link loader binding.
//!
//! A link holds at most one loader at a time. Binding again replaces the
//! previous loader; loaders are never chained.

use std::fmt;

/// Slot holding the loader bound to one link instance.
pub struct LoaderHook<F> {
    bound: Option<F>,
}

impl<F> LoaderHook<F> {
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// Bind `f`, returning the loader it replaced.
    pub fn bind(&mut self, f: F) -> Option<F> {
        self.bound.replace(f)
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut F> {
        self.bound.as_mut()
    }

    /// Remove and return the bound loader.
    pub fn unbind(&mut self) -> Option<F> {
        self.bound.take()
    }
}

impl<F> Default for LoaderHook<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for LoaderHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderHook")
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_overwrites() {
        let mut hook: LoaderHook<Box<dyn Fn(i32) -> i32>> = LoaderHook::new();
        assert!(!hook.is_bound());

        assert!(hook.bind(Box::new(|x| x + 1)).is_none());
        let previous = hook.bind(Box::new(|x| x * 10));
        assert!(previous.is_some());

        let f = hook.get_mut().unwrap();
        assert_eq!(f(2), 20);
    }

    #[test]
    fn test_unbind() {
        let mut hook = LoaderHook::new();
        hook.bind(|| 1);
        assert!(hook.unbind().is_some());
        assert!(!hook.is_bound());
    }
}

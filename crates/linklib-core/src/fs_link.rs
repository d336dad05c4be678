//! Filesystem paths resolved by folding over their components.
//!
//! Both `/` and `\` are accepted on input and normalized to the platform
//! separator before splitting.

use crate::error::{LinkError, Result};
use crate::hook::LoaderHook;
use crate::path::{Link, LinkKind, LinkPath};
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

/// Step function bound to a [`PathLink`].
pub enum FoldStep<A> {
    /// `(segment, previous) -> next`
    Plain(Box<dyn FnMut(&str, A) -> A>),
    /// `(segment, previous, history) -> next`
    WithHistory(Box<dyn FnMut(&str, A, &[A]) -> A>),
}

impl<A> fmt::Debug for FoldStep<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldStep::Plain(_) => f.write_str("FoldStep::Plain"),
            FoldStep::WithHistory(_) => f.write_str("FoldStep::WithHistory"),
        }
    }
}

/// A filesystem path whose components are folded by a bound step function.
#[derive(Debug)]
pub struct PathLink<A = String> {
    path: LinkPath,
    hook: LoaderHook<FoldStep<A>>,
}

/// Replace both separator styles with the platform separator.
pub fn normalize_separators(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

impl<A> PathLink<A> {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = normalize_separators(raw.as_ref());
        Self {
            path: LinkPath::new(normalized, MAIN_SEPARATOR),
            hook: LoaderHook::new(),
        }
    }

    pub fn path(&self) -> &LinkPath {
        &self.path
    }

    pub fn as_path(&self) -> &Path {
        Path::new(self.path.raw())
    }

    /// Existence of the literal path on disk. Does not run the fold.
    pub fn exists(&self) -> bool {
        self.as_path().exists()
    }

    /// Append further components to this path.
    pub fn join<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        parts
            .into_iter()
            .fold(self.as_path().to_path_buf(), |acc, part| acc.join(part))
    }

    pub fn is_bound(&self) -> bool {
        self.hook.is_bound()
    }
}

impl<A> PathLink<A>
where
    A: Clone + for<'a> From<&'a str> + 'static,
{
    /// Bind a step function, replacing any previous one.
    pub fn bind<F>(&mut self, step: F)
    where
        F: FnMut(&str, A) -> A + 'static,
    {
        self.hook.bind(FoldStep::Plain(Box::new(step)));
    }

    /// Bind a step function that also receives the running history.
    pub fn bind_with_history<F>(&mut self, step: F)
    where
        F: FnMut(&str, A, &[A]) -> A + 'static,
    {
        self.hook.bind(FoldStep::WithHistory(Box::new(step)));
    }

    /// Fold the bound step over the segments, left to right.
    ///
    /// The accumulator starts as the first segment and the step is first
    /// called with the second segment. In history mode the history starts as
    /// `[first]` and the current accumulator is pushed before every step, so
    /// the first entry appears twice by the time the step is first called.
    pub fn resolve(&mut self) -> Result<A> {
        let segments = self.path.segments();
        let step = self.hook.get_mut().ok_or_else(|| LinkError::NoLoaderBound {
            path: self.path.raw().to_string(),
        })?;

        let mut acc = A::from(segments[0].as_str());
        match step {
            FoldStep::Plain(f) => {
                for segment in &segments[1..] {
                    debug!("Folding segment '{}'", segment);
                    acc = f(segment.as_str(), acc);
                }
            }
            FoldStep::WithHistory(f) => {
                let mut history = vec![acc.clone()];
                for segment in &segments[1..] {
                    debug!("Folding segment '{}' ({} in history)", segment, history.len());
                    history.push(acc.clone());
                    acc = f(segment.as_str(), acc, &history);
                }
            }
        }
        Ok(acc)
    }

    /// Re-run the bound step function.
    pub fn invoke(&mut self) -> Result<A> {
        self.resolve()
    }

    /// Bind `step` and fold in one call.
    pub fn fold_with<F>(&mut self, step: F) -> Result<A>
    where
        F: FnMut(&str, A) -> A + 'static,
    {
        self.bind(step);
        self.resolve()
    }

    /// Bind a history-tracking `step` and fold in one call.
    pub fn fold_with_history<F>(&mut self, step: F) -> Result<A>
    where
        F: FnMut(&str, A, &[A]) -> A + 'static,
    {
        self.bind_with_history(step);
        self.resolve()
    }
}

impl<A> Link for PathLink<A> {
    fn kind(&self) -> LinkKind {
        LinkKind::Filesystem
    }
}

impl<A> fmt::Display for PathLink<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn native(parts: &[&str]) -> String {
        parts.join(MAIN_SEPARATOR.to_string().as_str())
    }

    #[test]
    fn test_separators_normalized() {
        let link: PathLink = PathLink::new("D:/test\\python");
        assert_eq!(link.path().raw(), native(&["D:", "test", "python"]));
        assert_eq!(link.path().segments(), &["D:", "test", "python"]);
    }

    #[test]
    fn test_fold_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        let mut link: PathLink = PathLink::new("a/b/c");
        let result = link
            .fold_with(move |segment, previous: String| {
                seen.borrow_mut().push((segment.to_string(), previous));
                format!("<{}>", segment)
            })
            .unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                ("b".to_string(), "a".to_string()),
                ("c".to_string(), "<b>".to_string()),
            ]
        );
        assert_eq!(result, "<c>");
    }

    #[test]
    fn test_trailing_separator_yields_empty_step() {
        let mut link: PathLink = PathLink::new("D:/loggers/");
        let last = link
            .fold_with(|segment, previous: String| {
                assert!(!previous.is_empty());
                segment.to_string()
            })
            .unwrap();
        assert_eq!(last, "");
    }

    #[test]
    fn test_history_duplicates_first_entry() {
        let mut link: PathLink = PathLink::new("a/b/c");
        let histories = Rc::new(RefCell::new(Vec::new()));
        let seen = histories.clone();
        link.fold_with_history(move |segment, _previous: String, history: &[String]| {
            seen.borrow_mut().push(history.to_vec());
            segment.to_string()
        })
        .unwrap();

        let histories = histories.borrow();
        assert_eq!(histories[0], vec!["a", "a"]);
        assert_eq!(histories[1], vec!["a", "a", "b"]);
    }

    #[test]
    fn test_running_path_accumulator() {
        let mut link: PathLink = PathLink::new("root/x/y");
        let built = link
            .fold_with(|segment, previous: String| format!("{}/{}", previous, segment))
            .unwrap();
        assert_eq!(built, "root/x/y");
    }

    #[test]
    fn test_single_segment_returns_first() {
        let mut link: PathLink = PathLink::new("alone");
        let result = link.fold_with(|_, _: String| unreachable!()).unwrap();
        assert_eq!(result, "alone");
    }

    #[test]
    fn test_resolve_without_binding_fails() {
        let mut link: PathLink = PathLink::new("a/b");
        assert!(matches!(
            link.resolve(),
            Err(LinkError::NoLoaderBound { .. })
        ));
    }

    #[test]
    fn test_invoke_reuses_binding() {
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        let mut link: PathLink = PathLink::new("a/b/c");
        link.bind(move |segment, _: String| {
            *seen.borrow_mut() += 1;
            segment.to_string()
        });
        link.invoke().unwrap();
        link.invoke().unwrap();
        assert_eq!(*count.borrow(), 4);
    }

    #[test]
    fn test_join() {
        let link: PathLink = PathLink::new("base");
        let joined = link.join(["one", "two"]);
        assert_eq!(joined, Path::new("base").join("one").join("two"));
    }

    #[test]
    fn test_kind_and_display() {
        let link: PathLink = PathLink::new("a/b");
        assert_eq!(link.kind(), LinkKind::Filesystem);
        assert_eq!(link.to_string(), native(&["a", "b"]));
    }
}

//! Ordered collection of listener responses.

use crate::error::ResponseError;
use std::collections::{VecDeque, vec_deque};

/// Responses gathered by a `collect` dispatch, in listener order.
///
/// Listeners that returned `None`, were skipped by their condition, or never
/// ran because the event was stopped contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responses<R> {
    items: VecDeque<R>,
}

impl<R> Responses<R> {
    /// An empty collection.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Remove and return the first response.
    pub fn shift(&mut self) -> Result<R, ResponseError> {
        self.items
            .pop_front()
            .ok_or(ResponseError::ResponseNotAvailable)
    }

    /// Remove and return the last response.
    pub fn pop(&mut self) -> Result<R, ResponseError> {
        self.items
            .pop_back()
            .ok_or(ResponseError::ResponseNotAvailable)
    }

    /// Peek at the first response.
    pub fn first(&self) -> Option<&R> {
        self.items.front()
    }

    /// Peek at the last response.
    pub fn last(&self) -> Option<&R> {
        self.items.back()
    }

    /// Append a response at the end.
    pub fn push(&mut self, response: R) {
        self.items.push_back(response);
    }

    /// Number of responses.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether no listener contributed a response.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in listener order.
    pub fn iter(&self) -> vec_deque::Iter<'_, R> {
        self.items.iter()
    }

    /// Unwrap into a plain vector.
    pub fn into_vec(self) -> Vec<R> {
        self.items.into()
    }
}

impl<R> Default for Responses<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> From<Vec<R>> for Responses<R> {
    fn from(items: Vec<R>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<R> FromIterator<R> for Responses<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<R> IntoIterator for Responses<R> {
    type Item = R;
    type IntoIter = vec_deque::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Responses<R> {
    type Item = &'a R;
    type IntoIter = vec_deque::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_and_pop() {
        let mut responses = Responses::from(vec!["a", "b", "c"]);
        assert_eq!(responses.count(), 3);
        assert_eq!(responses.first(), Some(&"a"));
        assert_eq!(responses.last(), Some(&"c"));

        assert_eq!(responses.shift(), Ok("a"));
        assert_eq!(responses.pop(), Ok("c"));
        assert_eq!(responses.shift(), Ok("b"));
        assert!(responses.is_empty());
    }

    #[test]
    fn test_empty_collection_fails() {
        let mut responses: Responses<String> = Responses::new();
        assert_eq!(responses.shift(), Err(ResponseError::ResponseNotAvailable));
        assert_eq!(responses.pop(), Err(ResponseError::ResponseNotAvailable));
    }

    #[test]
    fn test_iteration_keeps_order() {
        let responses: Responses<i32> = (1..=3).collect();
        let borrowed: Vec<&i32> = responses.iter().collect();
        assert_eq!(borrowed, vec![&1, &2, &3]);
        assert_eq!(responses.into_vec(), vec![1, 2, 3]);
    }
}

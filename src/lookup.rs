//! First-match lookups that return [`Optional`] instead of a nullable result
//!
//! Every lookup walks its sequence once and stops at the first match, so
//! infinite iterators are fine as long as something matches.

use crate::optional::Optional;
use futures::{Stream, StreamExt, TryStream, TryStreamExt};

/// First element of `sequence`, or the first one accepted by `predicate`
///
/// Empty sequences and sequences with no accepted element give the absent value.
pub fn find_first_or_absent<I, P>(sequence: I, predicate: Option<P>) -> Optional<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let mut iter = sequence.into_iter();
    let found = match predicate {
        Some(predicate) => iter.find(predicate),
        None => iter.next(),
    };
    found.into()
}

pub fn first_or_absent<I: IntoIterator>(sequence: I) -> Optional<I::Item> {
    find_first_or_absent(sequence, None::<fn(&I::Item) -> bool>)
}

pub fn find_or_absent<I, P>(sequence: I, predicate: P) -> Optional<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    find_first_or_absent(sequence, Some(predicate))
}

/// Method-call form of the lookups, available on every iterator
pub trait LookupExt: Iterator + Sized {
    fn first_or_absent(self) -> Optional<Self::Item> {
        first_or_absent(self)
    }

    fn find_or_absent<P>(self, predicate: P) -> Optional<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        find_or_absent(self, predicate)
    }
}

impl<I: Iterator> LookupExt for I {}

/// Stream counterpart of [`find_first_or_absent`]
///
/// Stops polling the stream as soon as an element is accepted.
pub async fn find_first_or_absent_stream<S, P>(stream: S, mut predicate: Option<P>) -> Optional<S::Item>
where
    S: Stream,
    P: FnMut(&S::Item) -> bool,
{
    futures::pin_mut!(stream);

    while let Some(item) = stream.next().await {
        if predicate.as_mut().is_some_and(|p| !p(&item)) {
            continue;
        }
        return Optional::of(item);
    }

    Optional::none()
}

/// Lookup over a fallible stream, such as rows coming back from a query
///
/// The first error ends the lookup and is returned as-is.
pub async fn try_find_first_or_absent_stream<S, P>(
    stream: S,
    mut predicate: Option<P>,
) -> Result<Optional<S::Ok>, S::Error>
where
    S: TryStream,
    P: FnMut(&S::Ok) -> bool,
{
    let stream = stream.into_stream();
    futures::pin_mut!(stream);

    while let Some(item) = stream.try_next().await? {
        if predicate.as_mut().is_some_and(|p| !p(&item)) {
            continue;
        }
        return Ok(Optional::of(item));
    }

    Ok(Optional::none())
}

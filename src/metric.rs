//! Metrics for indexing a `Rope`.
//!
//! A [`Metric`] names the unit in which positions into a [`Rope`] are
//! counted. A `Rope` is parameterised with the metric it is indexed by, so
//! the positional arguments of `insert`, `erase`, `substring`, and `at` all
//! mean the same thing for a given rope, and `at` can return something
//! sensible for that unit: a byte for a byte-indexed rope, a whole grapheme
//! cluster for a grapheme-indexed one.
//!
//! The metric also picks the buffer a leaf stores and decides where that
//! buffer may be cut. [`Graphemes`] keeps leaves as checked UTF-8 and only
//! ever cuts on cluster boundaries; [`Bytes`] keeps leaves as raw bytes and
//! cuts anywhere, even in the middle of a multi-byte character, exactly as
//! a flat byte buffer would.
//!
//! Two metrics are provided:
//!
//! + [`Graphemes`], the default: positions count user-perceived characters
//!   (extended grapheme clusters), so an emoji carrying a skin-tone modifier
//!   is one position even though it is two scalar values.
//! + [`Bytes`]: positions count bytes of the underlying text.
//!
//! # Examples
//!
//! ```
//! use braid::{Rope, ByteRope};
//!
//! let mut rope = Rope::new();
//! rope.append("👶🏽ç");
//! assert_eq!(rope.char_count(), 2);
//! assert_eq!(rope.at(0).as_deref(), Some("👶🏽"));
//!
//! let mut bytes = ByteRope::default();
//! bytes.append("abc");
//! assert_eq!(bytes.at(0), Some(b'a'));
//! ```
//!
//! [`Metric`]: trait.Metric.html
//! [`Rope`]: ../struct.Rope.html
//! [`Graphemes`]: enum.Graphemes.html
//! [`Bytes`]: enum.Bytes.html

use std::cmp;
use std::fmt;

use crate::unicode::Unicode;

/// A measurement assigning lengths and positions to rope text.
///
/// An implementation owns the representation of a leaf's buffer and all
/// translation between its index space and that buffer: how long the
/// buffer is in units, how to cut it at a unit boundary, and what the
/// `index`-th unit is.
pub trait Metric: Copy + fmt::Debug + Send + Sync + 'static {
    /// One element of this metric, as returned by [`Rope::at`].
    ///
    /// [`Rope::at`]: ../struct.Rope.html#method.at
    type Unit: Clone + fmt::Debug + PartialEq + Send;

    /// The owned buffer a leaf stores for this metric.
    type Buffer: AsRef<[u8]> + fmt::Debug + Send + Sync + 'static;

    /// Copies `text` into a fresh leaf buffer.
    fn buffer(text: &str) -> Self::Buffer;

    /// Returns the length of `buf` in this metric's units.
    fn measure(buf: &Self::Buffer) -> usize;

    /// Cuts `buf` in two so that the front holds the first `index` units,
    /// clamping `index` to the buffer's length. Never fails: a metric
    /// whose units span several bytes cuts on a unit boundary, and a
    /// byte metric may cut anywhere.
    fn split(buf: &Self::Buffer, index: usize) -> (Self::Buffer, Self::Buffer);

    /// Returns the `index`-th unit of `buf`, or `None` if `buf` is
    /// shorter than that.
    fn unit(buf: &Self::Buffer, index: usize) -> Option<Self::Unit>;
}

/// Byte indexing: every position is a byte offset.
///
/// Leaves hold raw bytes, and a split may land inside a multi-byte
/// character; the halves still concatenate back to the same bytes. See
/// [`ByteRope`] for how such fragments are rendered as text.
///
/// [`ByteRope`]: ../type.ByteRope.html
#[derive(Copy, Clone, Debug)]
pub enum Bytes {}

impl Metric for Bytes {
    type Unit = u8;
    type Buffer = Vec<u8>;

    #[inline]
    fn buffer(text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    #[inline]
    fn measure(buf: &Vec<u8>) -> usize {
        buf.len()
    }

    #[inline]
    fn split(buf: &Vec<u8>, index: usize) -> (Vec<u8>, Vec<u8>) {
        let (front, back) = buf.split_at(cmp::min(index, buf.len()));
        (front.to_vec(), back.to_vec())
    }

    #[inline]
    fn unit(buf: &Vec<u8>, index: usize) -> Option<u8> {
        buf.get(index).copied()
    }
}

/// Grapheme-cluster indexing: every position is one user-perceived
/// character, as segmented by [Unicode Standard Annex #29].
///
/// Leaves hold checked UTF-8 and are only ever cut on cluster boundaries,
/// so a unit is never torn in half. A cluster may span several `char`s
/// (and so several bytes); `unit` therefore yields an owned `String`
/// holding the whole cluster.
///
/// [Unicode Standard Annex #29]: https://www.unicode.org/reports/tr29/
#[derive(Copy, Clone, Debug)]
pub enum Graphemes {}

impl Metric for Graphemes {
    type Unit = String;
    type Buffer = String;

    #[inline]
    fn buffer(text: &str) -> String {
        text.to_owned()
    }

    #[inline]
    fn measure(buf: &String) -> usize {
        buf.grapheme_len()
    }

    #[inline]
    fn split(buf: &String, index: usize) -> (String, String) {
        let (front, back) = buf.split_at(buf.grapheme_byte_index(index));
        (front.to_owned(), back.to_owned())
    }

    #[inline]
    fn unit(buf: &String, index: usize) -> Option<String> {
        buf.grapheme_at(index).map(String::from)
    }
}

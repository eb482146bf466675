//! # A braid of strings.
//!
//! A rope is an efficient data structure for large mutable strings. It's
//! essentially a binary tree whose leaves are strings: splicing text into
//! the middle of a rope rebuilds a path of tree nodes instead of shifting
//! half of a flat buffer.
//!
//! The ropes in this crate are *persistent*. Nodes are immutable and shared
//! between ropes, so cloning a [`Rope`] is O(1), and editing one of the
//! clones never disturbs the other: the edit builds a new root and reuses
//! every subtree it didn't touch.
//!
//! Ropes are indexed through a [`Metric`]: by extended grapheme cluster
//! (the default, so positions correspond to user-perceived characters) or
//! by raw byte (the [`ByteRope`] alias). See the [`metric`] module.
//!
//! For more information on ropes, see:
//!
//! + <https://www.ibm.com/developerworks/library/j-ropes/>
//! + Boehm, Atkinson, Plass, "Ropes: An Alternative to Strings"
//!
//! # Examples
//!
//! ```
//! use braid::Rope;
//!
//! let mut rope = Rope::new();
//! rope.append("World");
//! rope.prepend("Hello, ");
//!
//! let snapshot = rope.clone();
//! rope.erase(5, 7);
//! rope.append("!");
//!
//! assert_eq!(rope.to_string(), "Hello!");
//! assert_eq!(snapshot.to_string(), "Hello, World");
//! ```
//!
//! [`Rope`]: struct.Rope.html
//! [`ByteRope`]: type.ByteRope.html
//! [`Metric`]: metric/trait.Metric.html
//! [`metric`]: metric/index.html

use std::cmp;
use std::fmt;
use std::ops;
use std::ops::Bound;
use std::sync::Arc;

mod internals;
pub mod metric;
mod unicode;

#[cfg(test)]
mod test;

use crate::internals::{Node, NodeRef};
use crate::metric::{Bytes, Graphemes, Metric};

/// A byte-indexed [`Rope`]: positions count bytes, and [`at`] yields one
/// byte at a time.
///
/// Positions are raw byte offsets with no boundary requirement, so an
/// `insert`, `erase`, or `substring` may cut inside a multi-byte
/// character. The rope's content stays byte-exact through such edits
/// ([`len`], [`bytes`], and [`to_bytes`] see the spliced bytes verbatim),
/// while text renderings like [`to_string`] and [`substring`] replace any
/// sequence that no longer forms valid UTF-8 with U+FFFD, the way
/// `String::from_utf8_lossy` does.
///
/// # Examples
/// ```
/// use braid::ByteRope;
///
/// let mut rope = ByteRope::default();
/// rope.append("12345");
/// assert_eq!(rope.at(0), Some(b'1'));
/// assert_eq!(rope.at(5), None);
/// ```
///
/// Cutting a character in half is fine; the bytes are preserved:
///
/// ```
/// use braid::ByteRope;
///
/// let mut rope = ByteRope::default();
/// rope.append("héllo");
/// assert!(rope.erase(2, 1));                  // drops é's second byte
/// assert_eq!(rope.to_bytes(), b"h\xC3llo");
/// assert_eq!(rope.len(), 5);
/// assert_eq!(rope.to_string(), "h\u{FFFD}llo");
/// ```
///
/// [`Rope`]: struct.Rope.html
/// [`at`]: struct.Rope.html#method.at
/// [`len`]: struct.Rope.html#method.len
/// [`bytes`]: struct.Rope.html#method.bytes
/// [`to_bytes`]: struct.Rope.html#method.to_bytes
/// [`to_string`]: struct.Rope.html#impl-Display
/// [`substring`]: struct.Rope.html#method.substring
pub type ByteRope = Rope<Bytes>;

/// A persistent rope, indexed by the metric `M`.
///
/// A `Rope` is a handle on an immutable tree of text fragments. Mutating
/// methods take `&mut self` only to rebind the handle's root; they never
/// edit a node that another rope can see. Cloning is O(1) and yields an
/// independent logical string that shares the tree:
///
/// ```
/// use braid::Rope;
///
/// let mut rope = Rope::new();
/// rope.append("shared text");
/// let snapshot = rope.clone();
///
/// rope.erase(0, 7);
/// assert_eq!(rope.to_string(), "text");
/// assert_eq!(snapshot.to_string(), "shared text");
/// ```
///
/// Positional arguments to [`insert`], [`erase`], [`substring`], and
/// [`at`] are counted in the rope's metric (grapheme clusters by default),
/// while [`len`] is always bytes.
///
/// [`insert`]: #method.insert
/// [`erase`]: #method.erase
/// [`substring`]: #method.substring
/// [`at`]: #method.at
/// [`len`]: #method.len
#[derive(Clone)]
pub struct Rope<M: Metric = Graphemes> {
    root: NodeRef<M>,
}

impl Rope<Graphemes> {
    /// Returns a new empty `Rope`.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let rope = Rope::new();
    /// assert_eq!(rope.len(), 0);
    /// assert_eq!(rope.to_string(), "");
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of grapheme clusters in this `Rope`.
    ///
    /// A cluster can span several scalar values, so this is usually
    /// smaller than [`len`], never larger.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("😀🙏🙍😻");
    /// assert_eq!(rope.char_count(), 4);
    /// rope.append("👶🏽");
    /// assert_eq!(rope.char_count(), 5);
    /// ```
    ///
    /// [`len`]: #method.len
    #[inline]
    pub fn char_count(&self) -> usize {
        self.root.units()
    }

    /// Returns an iterator over the grapheme clusters of this `Rope`.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("👶🏽ç!");
    /// let clusters: Vec<&str> = rope.graphemes().collect();
    /// assert_eq!(clusters, ["👶🏽", "ç", "!"]);
    /// ```
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        use unicode_segmentation::UnicodeSegmentation;
        self.strings().flat_map(|text| text.graphemes(true))
    }

    /// Returns an iterator over the text fragments of this `Rope`, in
    /// order. Concatenated, the fragments are the rope's text.
    #[inline]
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.root.strings()
    }

    /// Returns an iterator over the `char`s of this `Rope`.
    ///
    /// A `char` is a Unicode scalar value, which may not match your idea
    /// of a "character"; see [`graphemes`] for user-perceived characters.
    ///
    /// [`graphemes`]: #method.graphemes
    #[inline]
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.strings().flat_map(str::chars)
    }
}

impl<M: Metric> Rope<M> {
    /// Returns the length of this `Rope` in bytes, whatever its metric.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("👶🏽");
    /// assert_eq!(rope.len(), 8);
    /// assert_eq!(rope.measure(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns true if this `Rope` contains no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of this `Rope` in the units of its metric: the
    /// index space of [`insert`], [`erase`], [`substring`], and [`at`].
    ///
    /// [`insert`]: #method.insert
    /// [`erase`]: #method.erase
    /// [`substring`]: #method.substring
    /// [`at`]: #method.at
    #[inline]
    pub fn measure(&self) -> usize {
        self.root.units()
    }

    /// Appends `text` to the end of this `Rope`.
    ///
    /// Appending empty text leaves the rope untouched.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("Test");
    /// rope.append("ing");
    /// assert_eq!(rope.to_string(), "Testing");
    /// ```
    ///
    /// # Time complexity
    /// O(1) beyond copying `text` into a leaf.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.root = Node::concat(Arc::clone(&self.root), Node::leaf(text));
    }

    /// Prepends `text` to the beginning of this `Rope`.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("World");
    /// rope.prepend("Hello, ");
    /// assert_eq!(rope.to_string(), "Hello, World");
    /// ```
    pub fn prepend(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.root = Node::concat(Node::leaf(text), Arc::clone(&self.root));
    }

    /// Empties this `Rope`.
    ///
    /// Other ropes sharing the old tree keep it alive; this handle alone
    /// lets go of it.
    pub fn clear(&mut self) {
        self.root = Arc::new(Node::empty());
    }

    /// Inserts `text` so that it begins at position `index`, counted in
    /// this rope's metric.
    ///
    /// Returns false, without changing the rope, if `index` is past the
    /// end. Inserting empty text at a valid index returns true and leaves
    /// the text unchanged.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("Tst");
    /// assert!(rope.insert(1, "e"));
    /// assert_eq!(rope.to_string(), "Test");
    ///
    /// assert!(!rope.insert(10, "?"));
    /// assert_eq!(rope.to_string(), "Test");
    /// ```
    ///
    /// # Time complexity
    /// O(depth): a split and two concatenations.
    pub fn insert(&mut self, index: usize, text: &str) -> bool {
        let size = self.measure();
        if index > size {
            return false;
        }
        if text.is_empty() {
            return true;
        }
        if index == 0 {
            self.prepend(text);
        } else if index == size {
            self.append(text);
        } else {
            let (left, right) = Node::split(&self.root, index);
            self.root = Node::concat(Node::concat(left, Node::leaf(text)), right);
        }
        true
    }

    /// Erases `count` units starting at position `index`, counted in this
    /// rope's metric.
    ///
    /// Returns false only when `count` is 0. A range reaching past the end
    /// is clamped, so the erase silently truncates rather than failing.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("Hello, World");
    /// assert!(rope.erase(1, 7));
    /// assert_eq!(rope.to_string(), "Horld");
    ///
    /// assert!(!rope.erase(0, 0));
    /// ```
    pub fn erase(&mut self, index: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        let (left, rest) = Node::split(&self.root, index);
        let (_, right) = Node::split(&rest, count);
        self.root = Node::concat(left, right);
        true
    }

    /// Copies the given range of this `Rope`, counted in its metric, out
    /// into a `String`.
    ///
    /// Both endpoints are clamped to the rope, so a range reaching past
    /// the end simply stops there. For a byte-indexed rope the copied
    /// bytes may not form whole characters; invalid sequences are
    /// rendered with U+FFFD (see [`ByteRope`]).
    ///
    /// [`ByteRope`]: type.ByteRope.html
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("12345");
    /// assert_eq!(rope.substring(1..3), "23");
    /// assert_eq!(rope.substring(3..), "45");
    /// assert_eq!(rope.substring(0..100), "12345");
    /// assert_eq!(rope.substring(30..32), "");
    /// ```
    pub fn substring<R: ops::RangeBounds<usize>>(&self, range: R) -> String {
        let from = match range.start_bound() {
            Bound::Included(&bound) => bound,
            Bound::Excluded(&bound) => bound + 1,
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(&bound) => bound + 1,
            Bound::Excluded(&bound) => bound,
            Bound::Unbounded => self.measure(),
        };
        let (_, rest) = Node::split(&self.root, from);
        let (middle, _) = Node::split(&rest, to.saturating_sub(from));
        String::from_utf8_lossy(&middle.to_bytes()).into_owned()
    }

    /// Returns the unit at position `index`: a byte for a byte-indexed
    /// rope, a grapheme cluster for a grapheme-indexed one. Out-of-range
    /// positions yield `None`.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// rope.append("ab");
    /// assert_eq!(rope.at(1).as_deref(), Some("b"));
    /// assert_eq!(rope.at(2), None);
    /// ```
    ///
    /// # Time complexity
    /// O(depth) to reach the leaf, plus unit lookup within it.
    #[inline]
    pub fn at(&self, index: usize) -> Option<M::Unit> {
        self.root.at(index)
    }

    /// Concatenates two ropes without copying either, returning a new
    /// `Rope`.
    ///
    /// This is the persistent counterpart of [`append`]; both operands
    /// are left usable. The `+` operator delegates here.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut left = Rope::new();
    /// left.append("abcd");
    /// let mut right = Rope::new();
    /// right.append("efgh");
    ///
    /// assert_eq!(left.concat(&right).to_string(), "abcdefgh");
    /// assert_eq!(left.to_string(), "abcd");
    /// ```
    ///
    /// [`append`]: #method.append
    pub fn concat(&self, other: &Rope<M>) -> Rope<M> {
        if other.is_empty() {
            self.clone()
        } else if self.is_empty() {
            other.clone()
        } else {
            Rope {
                root: Node::concat(Arc::clone(&self.root), Arc::clone(&other.root)),
            }
        }
    }

    /// Returns true if this `Rope`'s tree passes the balance test: the
    /// depths of the root's subtrees differ by at most two.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.root.is_balanced()
    }

    /// Rebuilds an unbalanced `Rope` into a balanced tree over the same
    /// text. Does nothing to a rope that is already balanced.
    ///
    /// Rebalancing is never triggered implicitly; a long run of edits
    /// grows the tree until the caller asks for it to be rebuilt.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut rope = Rope::new();
    /// for _ in 0..100 {
    ///     rope.append("a");
    /// }
    /// rope.rebalance();
    /// assert!(rope.is_balanced());
    /// assert_eq!(rope.len(), 100);
    /// ```
    pub fn rebalance(&mut self) {
        if !self.is_balanced() {
            self.root = Node::rebalance(&self.root);
        }
    }

    /// Returns an iterator over the bytes of this `Rope`.
    #[inline]
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.root.fragments().flat_map(|chunk| chunk.iter().copied())
    }

    /// Copies this `Rope`'s content out into one flat byte buffer.
    ///
    /// Unlike `to_string`, this never substitutes anything: a
    /// byte-indexed rope's torn multi-byte sequences come out exactly as
    /// they were spliced.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.root.to_bytes()
    }
}

impl<M: Metric> Default for Rope<M> {
    /// Returns a new empty `Rope`.
    fn default() -> Self {
        Rope {
            root: Arc::new(Node::empty()),
        }
    }
}

impl<M: Metric> fmt::Display for Rope<M> {
    /// Writes out the rope's text by in-order leaf traversal. A
    /// byte-indexed rope's torn multi-byte sequences render as U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl<M: Metric> fmt::Debug for Rope<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rope[\"{}\"] {:?}", self.root, self.root)
    }
}

impl<M: Metric> From<String> for Rope<M> {
    fn from(text: String) -> Self {
        Rope::from(text.as_str())
    }
}

impl<'a, M: Metric> From<&'a str> for Rope<M> {
    fn from(text: &'a str) -> Self {
        if text.is_empty() {
            Rope::default()
        } else {
            Rope {
                root: Node::leaf(text),
            }
        }
    }
}

impl<M: Metric> FromIterator<char> for Rope<M> {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Rope::from(iter.into_iter().collect::<String>())
    }
}

//-- comparisons ----------------------------------------------------

impl<M: Metric> PartialEq for Rope<M> {
    /// Ropes are equal when their texts are, whatever the tree shapes.
    fn eq(&self, other: &Rope<M>) -> bool {
        self.len() == other.len() && self.bytes().eq(other.bytes())
    }
}

impl<M: Metric> Eq for Rope<M> {}

impl<M: Metric> PartialEq<str> for Rope<M> {
    /// Compares against `other`'s bytes fragment by fragment, without
    /// materializing the rope.
    fn eq(&self, other: &str) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut rest = other.as_bytes();
        for chunk in self.root.fragments() {
            let (head, tail) = rest.split_at(chunk.len());
            if head != chunk {
                return false;
            }
            rest = tail;
        }
        rest.is_empty()
    }
}

impl<'a, M: Metric> PartialEq<&'a str> for Rope<M> {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        <Self as PartialEq<str>>::eq(self, other)
    }
}

impl<M: Metric> cmp::PartialOrd for Rope<M> {
    fn partial_cmp(&self, other: &Rope<M>) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<M: Metric> cmp::Ord for Rope<M> {
    fn cmp(&self, other: &Rope<M>) -> cmp::Ordering {
        self.bytes().cmp(other.bytes())
    }
}

//-- concatenation --------------------------------------------------

impl<'a, M: Metric> ops::Add for &'a Rope<M> {
    type Output = Rope<M>;

    /// Non-destructively concatenates two `Rope`s, returning a new `Rope`.
    ///
    /// # Examples
    /// ```
    /// use braid::Rope;
    ///
    /// let mut left = Rope::new();
    /// left.append("ab");
    /// let mut right = Rope::new();
    /// right.append("cd");
    /// assert_eq!((&left + &right).to_string(), "abcd");
    /// ```
    #[inline]
    fn add(self, other: Self) -> Rope<M> {
        self.concat(other)
    }
}

impl<M: Metric> ops::Add for Rope<M> {
    type Output = Rope<M>;

    #[inline]
    fn add(self, other: Rope<M>) -> Rope<M> {
        self.concat(&other)
    }
}

impl<'a, M: Metric> ops::Add<&'a str> for Rope<M> {
    type Output = Rope<M>;

    #[inline]
    fn add(mut self, other: &'a str) -> Rope<M> {
        self.append(other);
        self
    }
}

impl<M: Metric> ops::AddAssign for Rope<M> {
    #[inline]
    fn add_assign(&mut self, other: Rope<M>) {
        *self = self.concat(&other);
    }
}

impl<'a, M: Metric> ops::AddAssign<&'a str> for Rope<M> {
    #[inline]
    fn add_assign(&mut self, other: &'a str) {
        self.append(other);
    }
}

#[cfg(test)]
impl<M: Metric> Rope<M> {
    /// Audits the cached aggregate lengths of the whole tree.
    pub(crate) fn assert_aggregates(&self) {
        self.root.assert_aggregates();
    }
}

/// Creates a [`GrowVec`](crate::GrowVec) from a literal list of elements, or
/// from an element and a count.
///
/// Expands to [`GrowVec::from_array`](crate::GrowVec::from_array) or
/// [`GrowVec::from_elem`](crate::GrowVec::from_elem) and therefore evaluates
/// to a `Result`.
///
/// ```
/// use growvec::growvec;
///
/// let v = growvec![1, 2, 3]?;
/// assert_eq!(v.capacity(), 6);
///
/// let w = growvec!["x"; 4]?;
/// assert_eq!(w.len(), 4);
/// # Ok::<(), growvec::Error>(())
/// ```
#[macro_export]
macro_rules! growvec {
    () => {
        $crate::GrowVec::from_array([])
    };
    ($elem:expr; $n:expr) => {
        $crate::GrowVec::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::GrowVec::from_array([$($x),+])
    };
}

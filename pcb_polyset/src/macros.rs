/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Construct a ring with the points given as a list of (x, y) internal unit tuples.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::ring;
/// # use pcb_polyset::core::math::Point;
/// let r = ring![(0, 0), (10, 0), (0, 10)];
/// assert_eq!(r.len(), 3);
/// assert_eq!(r.points()[1], Point::new(10, 0));
/// ```
#[macro_export]
macro_rules! ring {
    ($( $x:expr ),* $(,)?) => {
        $crate::polygon::Ring::from_points(vec![
            $( $crate::core::math::Point::new($x.0, $x.1) ),*
        ])
    };
}

use hexpath_core::Hex;

/// Cached neighbor computation helper.
///
/// Enumerates the six axial neighbors of a hex in the fixed
/// [`Hex::DIRECTIONS`] order, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Hex>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(6),
        }
    }

    /// Return the neighbors of `h` for which `keep` returns `true`.
    pub fn all(&mut self, h: Hex, keep: impl Fn(Hex) -> bool) -> &[Hex] {
        self.buf.clear();
        for n in h.neighbors() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_in_direction_order() {
        let mut nb = Neighbors::new();
        let got = nb.all(Hex::new(0, 0), |n| n.q >= 0 && n.r >= 0);
        assert_eq!(got, &[Hex::new(1, 0), Hex::new(0, 1)]);
    }

    #[test]
    fn buffer_is_reused() {
        let mut nb = Neighbors::default();
        assert_eq!(nb.all(Hex::new(5, 5), |_| true).len(), 6);
        assert!(nb.all(Hex::new(5, 5), |_| false).is_empty());
    }
}

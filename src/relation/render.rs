use std::fmt::{self, Display, Write};

use super::HashRelation;

impl<X: Display, Y: Display> HashRelation<X, Y> {
    /// Renders every bucket as produced by [`HashRelation::write_buckets`].
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_buckets(&mut out);
        out
    }

    /// Writes one line per bucket: `(x,y)` entries in chain order separated by
    /// `", "`. Empty buckets still produce their line break.
    pub fn write_buckets<W: Write>(&self, out: &mut W) -> fmt::Result {
        for bucket in 0..self.bucket_count() {
            for (pos, (_, node)) in self.chain(bucket).enumerate() {
                if pos > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "({},{})", node.x, node.y)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl<X: Display, Y: Display> Display for HashRelation<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_buckets(f)
    }
}

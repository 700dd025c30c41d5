//! Mesh output implementation
use super::Mesh;
use std::io::{BufWriter, Write};

impl Mesh {
    /// Writes a binary STL to the given output
    pub fn write_stl<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        // We're going to do many small writes and will typically be writing to
        // a file, so using a `BufWriter` saves excessive syscalls.
        let mut out = BufWriter::new(out);
        const HEADER: &[u8] = b"This is a binary STL file exported by isomesh";
        static_assertions::const_assert!(HEADER.len() <= 80);
        out.write_all(HEADER)?;
        out.write_all(&[0u8; 80 - HEADER.len()])?;
        out.write_all(&(self.triangles.len() as u32).to_le_bytes())?;
        for [a, b, c] in &self.triangles {
            // Face normal from the winding order, left unnormalized
            let normal = (b - a).cross(&(c - a));
            for p in &normal {
                out.write_all(&p.to_le_bytes())?;
            }
            for v in [a, b, c] {
                for p in v {
                    out.write_all(&p.to_le_bytes())?;
                }
            }
            out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
        }
        out.flush()?;
        Ok(())
    }

    /// Writes a Wavefront OBJ file to the given output
    ///
    /// Vertices are not shared between triangles, so each triangle adds three
    /// `v` lines and one `f` line.
    pub fn write_obj<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        let mut out = BufWriter::new(out);
        for t in &self.triangles {
            for v in t {
                writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
            }
        }
        for i in 0..self.triangles.len() {
            let j = i * 3 + 1;
            writeln!(out, "f {} {} {}", j, j + 1, j + 2)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector3;

    fn mesh() -> Mesh {
        Mesh {
            triangles: vec![
                [
                    Vector3::new(0.0, 0.0, 0.0),
                    Vector3::new(1.0, 0.0, 0.0),
                    Vector3::new(0.0, 1.0, 0.0),
                ],
                [
                    Vector3::new(0.0, 0.0, 1.0),
                    Vector3::new(0.0, 1.0, 1.0),
                    Vector3::new(1.0, 0.0, 1.0),
                ],
            ],
            ..Default::default()
        }
    }

    #[test]
    fn stl_layout() {
        let mut out = vec![];
        mesh().write_stl(&mut out).unwrap();
        assert_eq!(out.len(), 80 + 4 + 2 * 50);
        assert!(out.starts_with(b"This is a binary STL"));
        assert_eq!(&out[80..84], &2u32.to_le_bytes());

        let f = |i: usize| {
            f32::from_le_bytes(out[i..i + 4].try_into().unwrap())
        };
        // First normal is +Z, second is -Z
        assert_eq!([f(84), f(88), f(92)], [0.0, 0.0, 1.0]);
        assert_eq!([f(134), f(138), f(142)], [0.0, 0.0, -1.0]);
        // Second vertex of the first triangle
        assert_eq!([f(108), f(112), f(116)], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn obj_layout() {
        let mut out = vec![];
        mesh().write_obj(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[4], "v 0 1 1");
        assert_eq!(lines[6], "f 1 2 3");
        assert_eq!(lines[7], "f 4 5 6");
    }

    #[test]
    fn empty_mesh() {
        let mut out = vec![];
        Mesh::new().write_stl(&mut out).unwrap();
        assert_eq!(out.len(), 84);
        assert_eq!(&out[80..], &[0; 4]);

        let mut out = vec![];
        Mesh::new().write_obj(&mut out).unwrap();
        assert!(out.is_empty());
    }
}

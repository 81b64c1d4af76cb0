use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{error::FxResult, math::Fnv1a64};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Stable content hash; equal frames hash equally across runs and platforms.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ (u64::from(self.width) << 32));
        h.write_u64(u64::from(self.height));
        h.write_bytes(&self.data);
        h.finish()
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn save_png(&self, path: &Path) -> FxResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_tracks_content_and_shape() {
        let a = FrameRGBA {
            width: 1,
            height: 2,
            data: vec![0; 8],
            premultiplied: true,
        };
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());
        b.data[0] = 1;
        assert_ne!(a.digest(), b.digest());

        let c = FrameRGBA {
            width: 2,
            height: 1,
            ..a.clone()
        };
        assert_ne!(a.digest(), c.digest());
        assert!(a.is_blank());
    }

    #[test]
    fn unpremultiply_restores_channel() {
        let f = FrameRGBA {
            width: 1,
            height: 1,
            data: vec![64, 0, 0, 128],
            premultiplied: true,
        };
        assert_eq!(f.to_straight_rgba8(), vec![128, 0, 0, 128]);
    }
}

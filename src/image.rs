use crate::raster::Raster;
use crate::refs::{ObjectReferences, RefType};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};

/// A page raster ready to be embedded as an image XObject: zlib-compressed RGB
/// samples plus, when any pixel is not fully opaque, a compressed alpha channel
/// written as a soft mask
pub(crate) struct EncodedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl EncodedImage {
    pub(crate) fn encode(raster: &Raster) -> EncodedImage {
        let level = CompressionLevel::DefaultLevel as u8;
        let pixels = raster.as_rgba();

        let mask = pixels.pixels().any(|p| p.0[3] != u8::MAX).then(|| {
            let alphas: Vec<u8> = pixels.pixels().map(|p| p.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });

        let rgb: Vec<u8> = pixels
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();

        EncodedImage {
            width: raster.width(),
            height: raster.height(),
            rgb: compress_to_vec_zlib(&rgb, level),
            mask,
        }
    }

    pub(crate) fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// Write the image (and its mask) as objects, returning the image's reference
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::Image(image_index));
        let mask_id = self
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, self.rgb.as_slice());
        image.filter(Filter::FlateDecode);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, self.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    #[test]
    fn opaque_rasters_have_no_mask() {
        assert!(!EncodedImage::encode(&Raster::filled(4, 4, colours::WHITE)).has_mask());
        assert!(EncodedImage::encode(&Raster::new(4, 4)).has_mask());
    }

    #[test]
    fn samples_round_trip_through_zlib() {
        let encoded = EncodedImage::encode(&Raster::filled(2, 1, colours::PARCHMENT));
        let rgb = miniz_oxide::inflate::decompress_to_vec_zlib(&encoded.rgb).expect("inflates");
        assert_eq!(rgb, vec![0xEC, 0xEA, 0xED, 0xEC, 0xEA, 0xED]);
    }
}

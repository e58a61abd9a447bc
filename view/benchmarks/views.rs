//! Benchmarks rendering of composed views.
use brunch::Bench;

use image_view::{
    render, ArrayAccess, ArrayImage, ConvertAccess, Domain, GrayAverage, GrayLuminance, Rgb8,
    ScaleAxis, TransformAccess, ViewError,
};

#[derive(Debug)]
enum Chain {
    /// Read the image back unchanged.
    Copy,
    /// Mirror on the first axis and convert to gray.
    MirrorGray,
    /// Luminance of the image.
    Luminance,
    /// Upscale the first axis by a factor of two.
    Upscale,
}

struct Views {
    chain: Chain,
    sz: i64,
}

impl Views {
    fn name(&self) -> String {
        format!("views({:?}, {})", self.chain, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), ViewError> {
        let domain = Domain::with_shape(&[self.sz, self.sz])?;
        let image = ArrayImage::from_fn(domain.clone(), |pos| {
            Rgb8::new(pos[0] as u8, pos[1] as u8, (pos[0] ^ pos[1]) as u8)
        });

        let chain = self.chain;
        Ok(move || match chain {
            Chain::Copy => {
                render(ArrayAccess::new(&image), &domain).unwrap();
            }
            Chain::MirrorGray => {
                let mirrored = TransformAccess::mirrored(ArrayAccess::new(&image), &domain, 0)
                    .unwrap();
                render(ConvertAccess::new(mirrored, GrayAverage), &domain).unwrap();
            }
            Chain::Luminance => {
                let gray = ConvertAccess::new(ArrayAccess::new(&image), GrayLuminance::default());
                render(gray, &domain).unwrap();
            }
            Chain::Upscale => {
                let scaled = ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, 2.0).unwrap();
                let target = scaled.domain().clone();
                render(scaled, &target).unwrap();
            }
        })
    }
}

fn main() {
    let tests = [
        Views {
            chain: Chain::Copy,
            sz: 256,
        },
        Views {
            chain: Chain::MirrorGray,
            sz: 256,
        },
        Views {
            chain: Chain::Luminance,
            sz: 256,
        },
        Views {
            chain: Chain::Upscale,
            sz: 256,
        },
    ];

    let mut benches = brunch::Benches::default();
    benches.extend(tests.map(|views| {
        Bench::new(format!("view::views::main::{}", views.name()))
            .run(views.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}

//! Benchmarks the sliding maximum over whole images.
use brunch::Bench;

use image_view::{
    render, ArrayAccess, ArrayImage, Domain, FilterError, FilterOptions, HistogramKind, Radius,
    Rgb8,
};

struct Dilate {
    shape: &'static [i64],
    radius: i64,
    histogram: HistogramKind,
}

impl Dilate {
    fn name(&self) -> String {
        format!(
            "dilate({:?}, r={}, {:?})",
            self.shape, self.radius, self.histogram
        )
    }

    fn prepare(self) -> Result<Box<dyn FnMut()>, FilterError> {
        let domain = Domain::with_shape(self.shape).map_err(image_view::ViewError::from)?;
        let options = FilterOptions {
            radius: Radius::Scalar(self.radius),
            histogram: self.histogram,
            ..FilterOptions::default()
        };
        options.validate(domain.num_dimensions())?;

        let pattern = |pos: &[i64]| (pos.iter().sum::<i64>() * 37 % 251) as u8;
        let run: Box<dyn FnMut()> = match self.histogram {
            HistogramKind::Intensity => {
                let image = ArrayImage::from_fn(domain.clone(), pattern);
                Box::new(move || {
                    let filter = options
                        .sliding_max_gray(ArrayAccess::new(&image), &domain)
                        .unwrap();
                    render(filter, &domain).unwrap();
                })
            }
            HistogramKind::Rgb => {
                let image = ArrayImage::from_fn(domain.clone(), |pos| {
                    let v = pattern(pos);
                    Rgb8::new(v, v.wrapping_mul(3), !v)
                });
                Box::new(move || {
                    let filter = options
                        .sliding_max_rgb(ArrayAccess::new(&image), &domain)
                        .unwrap();
                    render(filter, &domain).unwrap();
                })
            }
        };

        Ok(run)
    }
}

fn main() {
    let tests = [
        Dilate {
            shape: &[256, 256],
            radius: 1,
            histogram: HistogramKind::Intensity,
        },
        Dilate {
            shape: &[256, 256],
            radius: 5,
            histogram: HistogramKind::Intensity,
        },
        Dilate {
            shape: &[256, 256],
            radius: 5,
            histogram: HistogramKind::Rgb,
        },
        Dilate {
            shape: &[48, 48, 48],
            radius: 3,
            histogram: HistogramKind::Intensity,
        },
    ];

    let mut benches = brunch::Benches::default();
    benches.extend(tests.map(|dilate| {
        Bench::new(format!("view::sliding::main::{}", dilate.name()))
            .run(dilate.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}

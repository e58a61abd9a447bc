use image_grid::{ArrayImage, Domain, Odometer, Strides};

#[test]
fn coordinate_round_trip() {
    let domains = [
        Domain::with_shape(&[7]).unwrap(),
        Domain::new(&[-3, 4], &[2, 9]).unwrap(),
        Domain::new(&[0, -1, 5], &[3, 1, 9]).unwrap(),
        Domain::with_shape(&[2, 1, 3, 2]).unwrap(),
    ];

    for domain in &domains {
        let strides = Strides::new(domain);
        let mut coord = vec![0; domain.num_dimensions()];

        for linear in 0..domain.len() as i64 {
            strides.to_coord(linear, &mut coord);
            assert!(domain.contains(&coord), "{:?} at {}", coord, linear);
            assert_eq!(strides.to_linear(&coord), linear, "{:?}", domain);
        }

        let mut odometer = Odometer::new(domain);
        while odometer.has_next() {
            odometer.advance();
            let linear = strides.to_linear(odometer.position());
            assert_eq!(linear, odometer.index());
            strides.to_coord(linear, &mut coord);
            assert_eq!(coord, odometer.position());
        }
    }
}

#[test]
fn odometer_visits_buffer_order() {
    let domain = Domain::new(&[1, 1], &[3, 2]).unwrap();
    let image = ArrayImage::from_fn(domain.clone(), |pos| pos.to_vec());

    let mut odometer = Odometer::new(&domain);
    let mut visited = vec![];
    while odometer.has_next() {
        odometer.advance();
        visited.push(odometer.position().to_vec());
    }

    assert_eq!(visited.as_slice(), image.as_slice());
    assert_eq!(visited.len(), domain.len());
}

#[test]
fn advance_reports_changed_axis() {
    let domain = Domain::with_shape(&[2, 2, 2]).unwrap();
    let mut odometer = Odometer::new(&domain);
    let changed: Vec<usize> = (0..8).map(|_| odometer.advance()).collect();
    assert_eq!(changed, [0, 0, 1, 0, 2, 0, 1, 0]);
    assert!(!odometer.has_next());
}

#[test]
fn jump_then_iterate() {
    let domain = Domain::with_shape(&[4, 4]).unwrap();
    let mut odometer = Odometer::new(&domain);
    odometer.jump(6);
    assert_eq!(odometer.position(), &[1, 1]);
    assert_eq!(odometer.index(), 5);
}

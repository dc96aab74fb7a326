mod tests {
    use matrix_composer::color::{OFF, Rgb};
    use matrix_composer::grid::{HEIGHT, WIDTH};
    use matrix_composer::mode::FireSimulation;
    use matrix_composer::mode::fire::{FIELD_HEIGHT, FIELD_WIDTH, quantize};
    use matrix_composer::FrameBuffer;

    const FACTOR: f32 = 0.8 / 5.0;

    fn heat(sim: &FireSimulation, x: usize, y: usize) -> f32 {
        sim.heat(x, y).unwrap()
    }

    #[test]
    fn test_field_has_margins() {
        assert_eq!(FIELD_WIDTH, 18);
        assert_eq!(FIELD_HEIGHT, 8);
        let sim = FireSimulation::new(1);
        assert_eq!(sim.heat(17, 7), Some(0.0));
        assert_eq!(sim.heat(18, 0), None);
    }

    #[test]
    fn test_reseed_always_spawns() {
        let mut sim = FireSimulation::new(99);
        for _ in 0..200 {
            sim.reseed();
            for y in [FIELD_HEIGHT - 2, FIELD_HEIGHT - 1] {
                let hot = (0..FIELD_WIDTH).filter(|x| heat(&sim, *x, y) == 1.0).count();
                // Five 3-wide spawns, overlapping at worst into one block
                assert!(hot >= 3);
                assert!(hot <= 15);
            }
            // Outer columns are never ignited
            assert_eq!(heat(&sim, 0, FIELD_HEIGHT - 1), 0.0);
            sim.diffuse();
        }
    }

    #[test]
    fn test_bottom_rows_are_binary() {
        let mut sim = FireSimulation::new(5);
        sim.step(&mut FrameBuffer::new());
        for x in 0..FIELD_WIDTH {
            for y in [FIELD_HEIGHT - 2, FIELD_HEIGHT - 1] {
                let value = heat(&sim, x, y);
                assert!(value == 0.0 || value == 1.0);
            }
        }
    }

    #[test]
    fn test_diffuse_sweeps_bottom_up() {
        let mut sim = FireSimulation::new(21);
        sim.reseed();
        sim.diffuse();

        let bottom = FIELD_HEIGHT - 3;
        for x in 1..FIELD_WIDTH - 1 {
            let expected = (heat(&sim, x, bottom + 1)
                + heat(&sim, x, bottom + 2)
                + heat(&sim, x - 1, bottom + 1)
                + heat(&sim, x + 1, bottom + 1))
                * FACTOR;
            assert!((heat(&sim, x, bottom) - expected).abs() < 1e-6);
        }

        // The next row up already sees the updated row below it
        let above = bottom - 1;
        for x in 2..FIELD_WIDTH - 2 {
            let expected = (heat(&sim, x, above + 1)
                + heat(&sim, x, above + 2)
                + heat(&sim, x - 1, above + 1)
                + heat(&sim, x + 1, above + 1))
                * FACTOR;
            assert!((heat(&sim, x, above) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_heat_stays_non_negative() {
        let mut sim = FireSimulation::new(1234);
        let mut frame = FrameBuffer::new();
        for _ in 0..300 {
            sim.step(&mut frame);
            for x in 0..FIELD_WIDTH {
                for y in 0..FIELD_HEIGHT {
                    assert!(heat(&sim, x, y) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_margin_columns_never_change() {
        let mut sim = FireSimulation::new(8);
        for _ in 0..50 {
            sim.reseed();
            sim.diffuse();
            for y in 0..FIELD_HEIGHT - 2 {
                assert_eq!(heat(&sim, 0, y), 0.0);
                assert_eq!(heat(&sim, FIELD_WIDTH - 1, y), 0.0);
            }
        }
    }

    #[test]
    fn test_quantize_thresholds() {
        assert_eq!(quantize(0.0), OFF);
        assert_eq!(quantize(0.10), OFF);
        assert_eq!(quantize(0.20), Rgb::new(20, 20, 20));
        assert_eq!(quantize(0.30), Rgb::new(180, 30, 0));
        assert_eq!(quantize(0.40), Rgb::new(220, 160, 0));
        assert_eq!(quantize(0.45), Rgb::new(255, 255, 180));
        assert_eq!(quantize(3.0), Rgb::new(255, 255, 180));
    }

    #[test]
    fn test_render_skips_left_margin() {
        let mut sim = FireSimulation::new(77);
        let mut frame = FrameBuffer::new();
        sim.step(&mut frame);

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let expected = quantize(heat(&sim, usize::from(x) + 1, usize::from(y)));
                assert_eq!(frame.pixel(x, y), Some(expected));
            }
        }
        // Seeded embers show up on the bottom row of the grid
        assert!((0..WIDTH).any(|x| frame.pixel(x, HEIGHT - 1) == Some(Rgb::new(255, 255, 180))));
    }
}

mod tests {
    use matrix_composer::color::{OFF, Rgb, clamp_channel, rgb_from_u32, scale};

    const AMBER: Rgb = Rgb {
        r: 230,
        g: 150,
        b: 0,
    };

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0xE69600), AMBER);
        assert_eq!(rgb_from_u32(0x000000), OFF);
        assert_eq!(rgb_from_u32(0xFFFFFF), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(0.0), 0);
        assert_eq!(clamp_channel(-12.5), 0);
        assert_eq!(clamp_channel(127.9), 127);
        assert_eq!(clamp_channel(255.0), 255);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(f32::NAN), 0);
        assert_eq!(clamp_channel(f32::INFINITY), 255);
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(AMBER, 1.0), AMBER);
        assert_eq!(scale(AMBER, 0.0), OFF);
        assert_eq!(scale(AMBER, 0.5), Rgb::new(115, 75, 0));
        // Factors above one saturate instead of wrapping
        assert_eq!(scale(AMBER, 1.2), Rgb::new(255, 180, 0));
    }
}

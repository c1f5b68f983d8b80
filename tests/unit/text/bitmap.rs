use super::*;

#[test]
fn table_covers_printable_ascii() {
    assert_eq!(glyph('A'), &[0x7e, 0x11, 0x11, 0x11, 0x7e]);
    assert_eq!(glyph('~'), &ASCII[94]);
    assert_eq!(glyph(' '), &[0; 5]);
    assert_eq!(glyph('\u{e9}'), &FALLBACK);
}

#[test]
fn dashes_map_to_hyphen() {
    assert_eq!(glyph('\u{2014}'), glyph('-'));
    assert_eq!(glyph('\u{2013}'), glyph('-'));
}

#[test]
fn measure_scales_with_size_and_length() {
    assert_eq!(measure("", 20.0), 0.0);
    assert_eq!(measure("a", 10.0), 5.0);
    assert_eq!(measure("ab", 10.0), 11.0);
    assert_eq!(measure("ab", 20.0), 22.0);
}

#[test]
fn draw_paints_cells_of_the_glyph() {
    let mut canvas = RasterBuffer::new(40, 40).unwrap();
    draw(&mut canvas, "I", 0.0, 0.0, 20.0, Rgb::new(255, 0, 0)).unwrap();
    // 'I' has its stem in column 2; unit is 2 px and glyph rows start one unit down.
    assert_eq!(canvas.pixel(4, 2), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(5, 8), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(0, 8).unwrap()[3], 0);
    assert_eq!(canvas.pixel(5, 1).unwrap()[3], 0);
}

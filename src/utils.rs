/// Combine the high and low bytes of a two-byte register
pub fn combine_bytes(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// Shortest angular distance between two angles in degrees, in [0, 180]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = a - b;
    let diff = if diff < 0.0 { -diff } else { diff } % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

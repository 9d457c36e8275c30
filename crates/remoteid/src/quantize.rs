//! Pure conversions between normative (float, metres/seconds/degrees) units
//! and the packed integer encodings used on the wire.
//!
//! Every function here is stateless and allocation-free. Out-of-range
//! inputs are clamped to the nearest representable value; `NaN` is encoded
//! as the field's "unknown" sentinel where one exists (the accuracy
//! buckets), otherwise as a raw zero, per the quantization policy.

/// `degrees * 1e7`, rounded to nearest, as a signed 32-bit integer.
pub fn encode_degrees(deg: f64) -> i32 {
    if deg.is_nan() {
        return 0;
    }
    let scaled = libm::round(deg * 1e7);
    clamp_f64_to_i32(scaled)
}

pub fn decode_degrees(encoded: i32) -> f64 {
    f64::from(encoded) * 1e-7
}

/// `(metres + 1000) * 2`, clamped to `[0, 65535]`. Used for barometric and
/// geometric altitude and for height above takeoff.
pub fn encode_altitude(metres: f32) -> u16 {
    if metres.is_nan() {
        return 0;
    }
    let scaled = libm::roundf((metres + 1000.0) * 2.0);
    clamp_f32_to_u16(scaled)
}

pub fn decode_altitude(encoded: u16) -> f32 {
    f32::from(encoded) / 2.0 - 1000.0
}

/// Largest NS/EW speed representable with the low-resolution (multiplier=0)
/// encoding, in m/s.
pub const SPEED_LOW_RANGE_MAX: f32 = 63.75;
/// Largest NS/EW speed representable at all, in m/s.
pub const SPEED_HIGH_RANGE_MAX: f32 = 254.25;

/// Encodes a horizontal speed magnitude, choosing the smallest
/// representation: multiplier=0 (0.25 m/s steps) while it fits, multiplier=1
/// (0.75 m/s steps, offset by 64 m/s) beyond that. The sign of the input is
/// not preserved: NS/EW speed is wire-magnitude-only (see the Design Notes
/// on horizontal-speed sign loss).
pub fn encode_speed(mps: f32) -> (u8, bool) {
    if mps.is_nan() {
        return (0, false);
    }
    let magnitude = libm::fabsf(mps);
    if magnitude <= SPEED_LOW_RANGE_MAX {
        let scaled = libm::roundf(magnitude * 4.0);
        (clamp_f32_to_u8(scaled), false)
    } else {
        let clamped = magnitude.min(SPEED_HIGH_RANGE_MAX);
        let scaled = libm::roundf((clamped - 64.0) * 0.75f32.recip());
        (clamp_f32_to_u8(scaled), true)
    }
}

/// Decodes a horizontal speed magnitude. The multiplier flag selects the
/// resolution; the wire value never carries a sign.
pub fn decode_speed(encoded: u8, multiplier: bool) -> f32 {
    if multiplier {
        f32::from(encoded) * 0.75 + 64.0
    } else {
        f32::from(encoded) / 4.0
    }
}

/// `round(m/s * 2)`, clamped to `[-127, 127]`.
pub fn encode_vertical_speed(mps: f32) -> i8 {
    if mps.is_nan() {
        return 0;
    }
    let scaled = libm::roundf(mps * 2.0);
    clamp_f32_to_i8(scaled)
}

pub fn decode_vertical_speed(encoded: i8) -> f32 {
    f32::from(encoded) / 2.0
}

/// `round(seconds_since_hour * 10)`, range `[0, 35999]`.
pub fn encode_timestamp(seconds_since_hour: f32) -> u16 {
    if seconds_since_hour.is_nan() {
        return 0;
    }
    let scaled = libm::roundf(seconds_since_hour * 10.0);
    clamp_f32_to_range_u16(scaled, 0, 35_999)
}

pub fn decode_timestamp(encoded: u16) -> f32 {
    f32::from(encoded) / 10.0
}

/// `metres * 10^-1`, i.e. units of 10 m, clamped to `[-127, 127]`.
pub fn encode_group_radius(metres: f32) -> i8 {
    if metres.is_nan() {
        return 0;
    }
    let scaled = libm::roundf(metres / 10.0);
    clamp_f32_to_i8(scaled)
}

pub fn decode_group_radius(encoded: i8) -> f32 {
    f32::from(encoded) * 10.0
}

/// `(metres + 1000) * 2`, as a signed 16-bit integer.
pub fn encode_group_ceiling(metres: f32) -> i16 {
    if metres.is_nan() {
        return 0;
    }
    let scaled = libm::roundf((metres + 1000.0) * 2.0);
    clamp_f32_to_i16(scaled)
}

pub fn decode_group_ceiling(encoded: i16) -> f32 {
    f32::from(encoded) / 2.0 - 1000.0
}

/// Ascending upper bounds (metres), tightest-first when reversed, for the
/// horizontal accuracy enumeration. Index `i` holds the bound for bucket
/// code `i + 1`; bucket 0 is the unknown sentinel.
const HORIZONTAL_ACCURACY_BOUNDS_M: [f32; 12] = [
    18_520.0, 7_408.0, 3_704.0, 1_852.0, 926.0, 555.6, 185.2, 92.6, 30.0,
    10.0, 3.0, 1.0,
];

const VERTICAL_ACCURACY_BOUNDS_M: [f32; 6] = [150.0, 45.0, 25.0, 10.0, 3.0, 1.0];

const SPEED_ACCURACY_BOUNDS_MPS: [f32; 4] = [10.0, 3.0, 1.0, 0.3];

/// The real-world ODID TS-accuracy enumeration steps in 0.1 s increments
/// from bucket 1 (0.1 s) to bucket 15 (1.5 s); spec.md describes the same
/// bucket-scan rule for this field but does not restate the table (only
/// horizontal/vertical/speed are enumerated in its §6). See DESIGN.md.
const TS_ACCURACY_STEP_S: f32 = 0.1;
const TS_ACCURACY_MAX_BUCKET: u8 = 15;

/// Scans tightest-to-loosest for the first bucket whose bound is at least
/// `value`; `0` (or NaN) maps to the unknown bucket.
pub fn encode_horizontal_accuracy(metres: f32) -> u8 {
    encode_bucket_scan(metres, &HORIZONTAL_ACCURACY_BOUNDS_M)
}

pub fn decode_horizontal_accuracy(code: u8) -> f32 {
    decode_bucket(code, &HORIZONTAL_ACCURACY_BOUNDS_M)
}

pub fn encode_vertical_accuracy(metres: f32) -> u8 {
    encode_bucket_scan(metres, &VERTICAL_ACCURACY_BOUNDS_M)
}

pub fn decode_vertical_accuracy(code: u8) -> f32 {
    decode_bucket(code, &VERTICAL_ACCURACY_BOUNDS_M)
}

pub fn encode_speed_accuracy(mps: f32) -> u8 {
    encode_bucket_scan(mps, &SPEED_ACCURACY_BOUNDS_MPS)
}

pub fn decode_speed_accuracy(code: u8) -> f32 {
    decode_bucket(code, &SPEED_ACCURACY_BOUNDS_MPS)
}

pub fn encode_ts_accuracy(seconds: f32) -> u8 {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    let bucket = libm::ceilf(seconds / TS_ACCURACY_STEP_S);
    clamp_f32_to_range_u8(bucket, 1, TS_ACCURACY_MAX_BUCKET)
}

pub fn decode_ts_accuracy(code: u8) -> f32 {
    if code == 0 {
        0.0
    } else {
        f32::from(code.min(TS_ACCURACY_MAX_BUCKET)) * TS_ACCURACY_STEP_S
    }
}

/// Generic "first bucket (tightest to loosest) whose bound is >= value"
/// scan, with 0/NaN mapped to the unknown bucket (code 0). `bounds` is
/// sorted loosest-first (index 0 is the widest bucket, code 1); the scan
/// itself runs tightest-first, i.e. in reverse.
fn encode_bucket_scan(value: f32, bounds: &[f32]) -> u8 {
    if value.is_nan() || value == 0.0 {
        return 0;
    }
    let magnitude = libm::fabsf(value);
    for (idx, bound) in bounds.iter().enumerate().rev() {
        if magnitude <= *bound {
            return (idx as u8) + 1;
        }
    }
    // Worse than every defined bucket, i.e. at or beyond the loosest bound:
    // the unknown sentinel, not the loosest bucket — reporting bucket 1
    // here would claim better accuracy than was actually observed.
    0
}

fn decode_bucket(code: u8, bounds: &[f32]) -> f32 {
    if code == 0 {
        return 0.0;
    }
    let idx = (code as usize).saturating_sub(1).min(bounds.len() - 1);
    bounds[idx]
}

fn clamp_f64_to_i32(v: f64) -> i32 {
    if v >= i32::MAX as f64 {
        i32::MAX
    } else if v <= i32::MIN as f64 {
        i32::MIN
    } else {
        v as i32
    }
}

fn clamp_f32_to_u16(v: f32) -> u16 {
    if v <= 0.0 {
        0
    } else if v >= u16::MAX as f32 {
        u16::MAX
    } else {
        v as u16
    }
}

fn clamp_f32_to_u8(v: f32) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= u8::MAX as f32 {
        u8::MAX
    } else {
        v as u8
    }
}

fn clamp_f32_to_i8(v: f32) -> i8 {
    if v <= i8::MIN as f32 {
        i8::MIN
    } else if v >= i8::MAX as f32 {
        i8::MAX
    } else {
        v as i8
    }
}

fn clamp_f32_to_i16(v: f32) -> i16 {
    if v <= i16::MIN as f32 {
        i16::MIN
    } else if v >= i16::MAX as f32 {
        i16::MAX
    } else {
        v as i16
    }
}

fn clamp_f32_to_range_u16(v: f32, lo: u16, hi: u16) -> u16 {
    if v <= lo as f32 {
        lo
    } else if v >= hi as f32 {
        hi
    } else {
        v as u16
    }
}

fn clamp_f32_to_range_u8(v: f32, lo: u8, hi: u8) -> u8 {
    if v <= lo as f32 {
        lo
    } else if v >= hi as f32 {
        hi
    } else {
        v as u8
    }
}

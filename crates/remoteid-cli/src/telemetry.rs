//! Telemetry collaborator (§6, expansion): produces snapshots asynchronously.
//! The core never calls this — acquiring GNSS fixes is explicitly out of
//! scope (§1). `SyntheticTelemetry` stands in for a real GNSS/INS feed with
//! an oscillating flight path generator plus GNSS-like jitter, in the
//! spirit of `original_source`'s `drone_adopt_gps_data` but without its
//! `gpsd` dependency.

use std::f64::consts::TAU;

use rand_distr::{Distribution, Normal};
use remoteid::snapshot::{
    BasicId, IdType, Location, LocationSource, Status, System, UasSnapshot,
    UasType,
};

/// Metres per degree of latitude, used to convert a metre-scale GNSS jitter
/// sigma into the position's native degree units.
const METRES_PER_DEGREE: f64 = 111_320.0;
/// 1-sigma horizontal GNSS jitter, in metres.
const POSITION_JITTER_SIGMA_M: f64 = 1.5;
/// 1-sigma jitter applied to the reported accuracy fields themselves, in
/// their native metre/(m/s)/second units.
const ACCURACY_JITTER_SIGMA: f32 = 0.2;

/// Produces telemetry snapshots on demand. The core imposes no polling
/// cadence; that's a collaborator concern (§6).
pub trait TelemetrySource {
    async fn next(&mut self) -> UasSnapshot;
}

/// Radius of the circular flight path around the home position, in degrees.
const ORBIT_RADIUS_DEG: f64 = 0.0015;
/// Angular rate of the orbit, in radians per tick.
const ORBIT_RATE_RAD: f64 = 0.05;
/// Constant horizontal speed magnitude along the orbit, in m/s.
const ORBIT_SPEED_MPS: f32 = 15.0;
/// Home altitude above the takeoff point, in metres; the orbit oscillates
/// +/- this much around it.
const ALTITUDE_SWING_M: f32 = 10.0;

/// An oscillating flight path: the aircraft circles a home position at
/// constant speed while its altitude gently ramps up and down, with
/// GNSS-like Gaussian jitter layered on top of the position and accuracy
/// fields. Every call advances one tick; ticks have no fixed relationship
/// to wall time, since cadence is a collaborator concern, not a core one.
pub struct SyntheticTelemetry {
    home_lat: f64,
    home_lon: f64,
    base_altitude: f32,
    uas_id: [u8; 20],
    tick: u64,
}

impl SyntheticTelemetry {
    pub fn new(home_lat: f64, home_lon: f64, uas_id: &str) -> Self {
        let mut id = [0u8; 20];
        let bytes = uas_id.as_bytes();
        let n = bytes.len().min(id.len());
        id[..n].copy_from_slice(&bytes[..n]);
        Self {
            home_lat,
            home_lon,
            base_altitude: 100.0,
            uas_id: id,
            tick: 0,
        }
    }
}

impl TelemetrySource for SyntheticTelemetry {
    async fn next(&mut self) -> UasSnapshot {
        let t = self.tick as f64;
        self.tick += 1;

        let track = (t * ORBIT_RATE_RAD) % TAU;
        let mut rng = rand::thread_rng();
        let position_jitter_deg = POSITION_JITTER_SIGMA_M / METRES_PER_DEGREE;
        let jitter = Normal::new(0.0, position_jitter_deg).unwrap();
        let latitude = self.home_lat
            + ORBIT_RADIUS_DEG * libm::sin(track)
            + jitter.sample(&mut rng);
        let longitude = self.home_lon
            + ORBIT_RADIUS_DEG * libm::cos(track)
            + jitter.sample(&mut rng);
        let speed_ns = ORBIT_SPEED_MPS * libm::cosf(track as f32);
        let speed_ew = ORBIT_SPEED_MPS * libm::sinf(track as f32);
        let altitude = self.base_altitude
            + ALTITUDE_SWING_M * libm::sinf(t as f32 * 0.02);
        let timestamp = (t * 0.5) % 3600.0;

        let accuracy_jitter = Normal::new(0.0, ACCURACY_JITTER_SIGMA).unwrap();
        let mut jittered_accuracy = |base: f32| {
            libm::fabsf(base + accuracy_jitter.sample(&mut rng))
        };

        UasSnapshot {
            basic_id: BasicId {
                uas_type: UasType::Rotorcraft,
                id_type: IdType::SerialNumber,
                uas_id: self.uas_id,
            },
            location: Location {
                status: Status::Airborne,
                speed_ns,
                speed_ew,
                speed_vertical: 0.0,
                latitude,
                longitude,
                altitude_baro: altitude,
                altitude_geo: altitude,
                height_above_takeoff: altitude - self.base_altitude,
                horiz_accuracy: jittered_accuracy(3.0),
                vert_accuracy: jittered_accuracy(3.0),
                speed_accuracy: jittered_accuracy(1.0),
                ts_accuracy: jittered_accuracy(0.1),
                timestamp: timestamp as f32,
            },
            system: System {
                location_source: LocationSource::LiveGnss,
                latitude: self.home_lat,
                longitude: self.home_lon,
                ..System::default()
            },
            ..UasSnapshot::default()
        }
    }
}

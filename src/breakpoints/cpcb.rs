//! CPCB National AQI breakpoints (India).
//!
//! 24-hour averaging for PM2.5, PM10, NO2 and SO2; 8-hour for O3 and CO.
//! CO is in mg/m³, everything else in µg/m³.
//!
//! The published table leaves the top band open ("250+", "430+", ...). The top
//! row here closes it with the width of the band below so that saturation can
//! extrapolate at that rate.

use super::Breakpoint;

const fn bp(c_low: f64, c_high: f64, i_low: f64, i_high: f64) -> Breakpoint {
    Breakpoint { c_low, c_high, i_low, i_high }
}

pub(super) static PM25: &[Breakpoint] = &[
    bp(0.0, 30.0, 0.0, 50.0),
    bp(30.0, 60.0, 50.0, 100.0),
    bp(60.0, 90.0, 100.0, 200.0),
    bp(90.0, 120.0, 200.0, 300.0),
    bp(120.0, 250.0, 300.0, 400.0),
    bp(250.0, 380.0, 400.0, 500.0),
];

pub(super) static PM10: &[Breakpoint] = &[
    bp(0.0, 50.0, 0.0, 50.0),
    bp(50.0, 100.0, 50.0, 100.0),
    bp(100.0, 250.0, 100.0, 200.0),
    bp(250.0, 350.0, 200.0, 300.0),
    bp(350.0, 430.0, 300.0, 400.0),
    bp(430.0, 510.0, 400.0, 500.0),
];

pub(super) static NO2: &[Breakpoint] = &[
    bp(0.0, 40.0, 0.0, 50.0),
    bp(40.0, 80.0, 50.0, 100.0),
    bp(80.0, 180.0, 100.0, 200.0),
    bp(180.0, 280.0, 200.0, 300.0),
    bp(280.0, 400.0, 300.0, 400.0),
    bp(400.0, 520.0, 400.0, 500.0),
];

pub(super) static O3: &[Breakpoint] = &[
    bp(0.0, 50.0, 0.0, 50.0),
    bp(50.0, 100.0, 50.0, 100.0),
    bp(100.0, 168.0, 100.0, 200.0),
    bp(168.0, 208.0, 200.0, 300.0),
    bp(208.0, 748.0, 300.0, 400.0),
    bp(748.0, 1288.0, 400.0, 500.0),
];

pub(super) static SO2: &[Breakpoint] = &[
    bp(0.0, 40.0, 0.0, 50.0),
    bp(40.0, 80.0, 50.0, 100.0),
    bp(80.0, 380.0, 100.0, 200.0),
    bp(380.0, 800.0, 200.0, 300.0),
    bp(800.0, 1600.0, 300.0, 400.0),
    bp(1600.0, 2400.0, 400.0, 500.0),
];

pub(super) static CO: &[Breakpoint] = &[
    bp(0.0, 1.0, 0.0, 50.0),
    bp(1.0, 2.0, 50.0, 100.0),
    bp(2.0, 10.0, 100.0, 200.0),
    bp(10.0, 17.0, 200.0, 300.0),
    bp(17.0, 34.0, 300.0, 400.0),
    bp(34.0, 51.0, 400.0, 500.0),
];

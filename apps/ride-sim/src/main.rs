// This file is part of OpenWiiceiver.
//
// OpenWiiceiver is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenWiiceiver is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenWiiceiver.  If not, see <http://www.gnu.org/licenses/>.
use anyhow::Result;
use chuck::ChuckReading;
use nvram::{FileDevice, MemoryDevice, NvDevice};
use std::path::PathBuf;
use structopt::StructOpt;
use throttle::{LogTraceSink, Throttle, GESTURE_HOLD_TICKS};

const NVRAM_LEN: usize = 16;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ride-sim",
    about = "Replay a scripted ride through the throttle core"
)]
struct Opt {
    #[structopt(
        short = "n",
        long = "nvram",
        help = "Back storage with this image file so the trained ceiling survives re-runs",
        parse(from_os_str)
    )]
    nvram: Option<PathBuf>,

    #[structopt(
        short = "c",
        long = "calibrate",
        help = "Hold the calibration pose long enough to train a new ceiling"
    )]
    calibrate: bool,

    #[structopt(
        short = "s",
        long = "stride",
        help = "Print every Nth tick",
        default_value = "25"
    )]
    stride: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    match &opt.nvram {
        Some(path) => ride(FileDevice::open(path, NVRAM_LEN)?, &opt),
        None => ride(MemoryDevice::new(NVRAM_LEN), &opt),
    }
}

fn ride<D: NvDevice>(device: D, opt: &Opt) -> Result<()> {
    let mut throttle = Throttle::new(device).with_trace_sink(Box::new(LogTraceSink));
    throttle.init();
    println!("cruise ceiling at power-on: {:.2}", throttle.cruise_ceiling());

    let mut tick = 0usize;

    // Roll on gradually, then hold a steady manual speed.
    phase(&mut throttle, &mut tick, opt.stride, "manual ramp", 100, |i| {
        ChuckReading::stick(0., 0.72 * (i + 1) as f32 / 100.)
    });
    phase(&mut throttle, &mut tick, opt.stride, "manual hold", 50, |_| {
        ChuckReading::stick(0., 0.72)
    });

    if opt.calibrate {
        let hold = GESTURE_HOLD_TICKS as usize + 10;
        phase(
            &mut throttle,
            &mut tick,
            opt.stride,
            "calibration hold",
            hold,
            |_| ChuckReading::cruise(0.9, 0.),
        );
        println!("trained cruise ceiling: {:.2}", throttle.cruise_ceiling());
    }

    // Let go of the stick with cruise held; the core eases toward the
    // ceiling and then holds.
    phase(&mut throttle, &mut tick, opt.stride, "cruise", 250, |_| {
        ChuckReading::cruise(0., 0.)
    });
    // A forward nudge in cruise, sharpened by Z.
    phase(&mut throttle, &mut tick, opt.stride, "cruise bump", 50, |_| {
        ChuckReading::cruise(0., 0.9).with_z()
    });

    // Release everything and coast to a stop.
    phase(&mut throttle, &mut tick, opt.stride, "coast", 100, |_| {
        ChuckReading::centered()
    });

    throttle.zero();
    println!("final throttle: {:+.4}", throttle.throttle());
    Ok(())
}

fn phase<D, F>(
    throttle: &mut Throttle<D>,
    tick: &mut usize,
    stride: usize,
    label: &str,
    ticks: usize,
    reading_at: F,
) where
    D: NvDevice,
    F: Fn(usize) -> ChuckReading,
{
    println!("-- {}", label);
    for i in 0..ticks {
        let reading = reading_at(i);
        let smoothed = throttle.update(&reading);
        if *tick % stride.max(1) == 0 {
            println!(
                "{:5}  y={:+.3} c={} z={}  position={:+.4} smoothed={:+.4}",
                tick,
                reading.y,
                reading.c as u8,
                reading.z as u8,
                throttle.position(),
                smoothed
            );
        }
        *tick += 1;
    }
}

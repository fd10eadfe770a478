use clap::Parser;
use pbpvr::{ChamberPressureModel, ChamberWall, KPa, VolumeRatio};

/// Print EDPVR and ESPVR pressure-volume tables for a spherical heart chamber
#[derive(Parser, Debug)]
struct Args {
    /// Wall thickness normalized by the unloaded inner radius
    #[arg(long, default_value_t = 0.27)]
    thickness: f64,

    /// Passive stiffness scale in kPa
    #[arg(long, default_value_t = 1.0)]
    stiffness: f64,

    /// Passive stiffening exponent
    #[arg(long, default_value_t = 3.8)]
    stiffening: f64,

    /// Peak active tension in kPa
    #[arg(long, default_value_t = 50.0)]
    active_tension: f64,

    /// Smallest volume ratio of the table
    #[arg(long, default_value_t = 1.0)]
    min_volume: f64,

    /// Largest volume ratio of the table
    #[arg(long, default_value_t = 2.2)]
    max_volume: f64,

    /// Number of table rows
    #[arg(long, default_value_t = 25)]
    samples: usize,
}

fn main() -> eyre::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let wall = ChamberWall::default()
        .with_thickness(args.thickness)
        .with_stiffness(KPa(args.stiffness).into())
        .with_stiffening(args.stiffening)
        .with_active_tension(KPa(args.active_tension).into());

    let edpvr = ChamberPressureModel::edpvr(wall.clone())?;
    let espvr = ChamberPressureModel::espvr(wall)?;

    let v30 = edpvr.klotz_reference_ratio()?;
    log::info!(
        "calibrated V30/V0 = {:.6} (residual {:.2e} mmHg, {} iterations)",
        v30.volume_ratio.0,
        v30.residual.0,
        v30.iterations
    );

    println!(
        "  {:>8} {:>14} {:>14}",
        "V/V0", "EDPVR [mmHg]", "ESPVR [mmHg]"
    );
    println!("{}", "-".repeat(8 + 14 * 2 + 4));

    for i in 0..args.samples {
        let q = i as f64 / args.samples.saturating_sub(1).max(1) as f64;
        let vn = VolumeRatio(args.min_volume + q * (args.max_volume - args.min_volume));

        let p_ed = edpvr.pressure(vn)?;
        let p_es = espvr.pressure(vn)?;

        println!("  {:>8.3} {:>14.4} {:>14.4}", vn.0, p_ed.0, p_es.0);
    }

    println!("V30/V0 = {:.4}", v30.volume_ratio.0);

    Ok(())
}

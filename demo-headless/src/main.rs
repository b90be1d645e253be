use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wind_sim_core::power::{linspace, DEFAULT_ENERGY_PRICE_PER_MWH};
use wind_sim_core::{
    MetersPerSecond, PowerCurveEngine, SampledRun, TurbineParameters, TurbinePreset, Watts,
    WindModel, WindRegimeParameters, WindSimError,
};

/// Wind turbine performance estimate with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wind-sim-demo")]
#[command(about = "Wind turbine energy output estimate", long_about = None)]
struct Args {
    /// Turbine preset (small, medium, large)
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// Blade radius in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Power coefficient Cp (0 - 0.593)
    #[arg(long)]
    cp: Option<f64>,

    /// Rated power in kW
    #[arg(long)]
    rated_kw: Option<f64>,

    /// Air density in kg/m³
    #[arg(long)]
    air_density: Option<f64>,

    /// Mechanical/electrical efficiency (0 - 1)
    #[arg(long)]
    efficiency: Option<f64>,

    /// Weibull shape parameter k
    #[arg(short = 'k', long, default_value_t = 2.0)]
    shape: f64,

    /// Weibull scale parameter c in m/s
    #[arg(short = 'c', long, default_value_t = 7.0)]
    scale: f64,

    /// Cut-in wind speed in m/s
    #[arg(long)]
    cut_in: Option<f64>,

    /// Rated wind speed in m/s
    #[arg(long)]
    rated_speed: Option<f64>,

    /// Cut-out wind speed in m/s
    #[arg(long)]
    cut_out: Option<f64>,

    /// Number of discretization bins
    #[arg(long)]
    bins: Option<usize>,

    /// Upper wind speed bound of the discretization in m/s
    #[arg(long)]
    vmax: Option<f64>,

    /// Number of Monte-Carlo wind samples (0 = skip)
    #[arg(short, long, default_value_t = 1000)]
    samples: usize,

    /// Seed for the wind samples
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Energy price in $/MWh for the revenue estimate
    #[arg(long, default_value_t = DEFAULT_ENERGY_PRICE_PER_MWH)]
    price: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn build_turbine(args: &Args) -> Result<TurbineParameters, WindSimError> {
    let preset = match args.preset.as_deref() {
        Some(name) => TurbinePreset::from_name(name).ok_or_else(|| {
            WindSimError::invalid("preset", format!("unknown preset '{name}'"))
        })?,
        None => TurbinePreset::Medium,
    };
    info!("Using '{}' turbine preset", preset.name());

    let mut config = preset.config();
    if let Some(radius) = args.radius {
        config = config.with_blade_radius(radius);
    }
    if let Some(cp) = args.cp {
        config = config.with_power_coefficient(cp);
    }
    if let Some(kw) = args.rated_kw {
        config = config.with_rated_power(Watts::from_kilowatts(kw));
    }
    if let Some(rho) = args.air_density {
        config = config.with_air_density(rho);
    }
    if let Some(eta) = args.efficiency {
        config = config.with_efficiency(eta);
    }
    let cut_in = args.cut_in.unwrap_or(*config.cut_in_speed);
    let rated = args.rated_speed.unwrap_or(*config.rated_speed);
    let cut_out = args.cut_out.unwrap_or(*config.cut_out_speed);
    config = config.with_speeds(cut_in, rated, cut_out);

    config.build()
}

fn build_regime(args: &Args) -> Result<WindRegimeParameters, WindSimError> {
    let mut regime = WindRegimeParameters::new(args.shape, MetersPerSecond::new(args.scale))?;
    if let Some(vmax) = args.vmax {
        regime = regime.with_upper_bound(MetersPerSecond::new(vmax))?;
    }
    if let Some(bins) = args.bins {
        regime = regime.with_bins(bins)?;
    }
    Ok(regime)
}

fn run(args: &Args) -> Result<(), WindSimError> {
    let turbine = build_turbine(args)?;
    let regime = build_regime(args)?;

    let engine = PowerCurveEngine::new(turbine);
    let model = WindModel::from_regime(&regime);
    let metrics = engine.metrics(&model)?;
    let t = engine.turbine();

    println!("=== Wind Turbine Performance ===\n");
    println!("Turbine:");
    println!(
        "  Rotor: {:.1} m diameter, {:.0} m² swept area",
        *t.rotor_diameter(),
        *t.swept_area()
    );
    println!(
        "  Cp {:.3}, efficiency {:.2}, air density {:.3} kg/m³",
        t.power_coefficient(),
        t.efficiency(),
        *t.air_density()
    );
    println!(
        "  Cut-in {}, rated {}, cut-out {}",
        t.cut_in_speed(),
        t.rated_speed(),
        t.cut_out_speed()
    );
    println!(
        "  Rated power {} (cubic curve reaches it at {})",
        t.rated_power(),
        engine.knee_speed()
    );
    println!(
        "\nWind: Weibull k = {:.2}, c = {}, {} bins up to {}",
        model.shape(),
        model.scale(),
        model.bins(),
        model.upper_bound()
    );

    println!("\nPerformance:");
    println!("  Mean wind speed:    {}", metrics.mean_wind_speed);
    println!("  Expected power:     {}", metrics.expected_power);
    println!(
        "  Capacity factor:    {:.1}%",
        metrics.efficiency_percent()
    );
    println!("  Annual energy:      {}", metrics.annual_energy);
    println!(
        "  Daily energy:       {:.0} kWh",
        metrics.daily_energy.to_kilowatt_hours()
    );
    println!(
        "  Operating:          {:.1}% of the time ({:.1}% at rated)",
        metrics.operating_fraction * 100.0,
        metrics.rated_fraction * 100.0
    );
    println!(
        "  Annual revenue:     ${:.0} at ${:.0}/MWh",
        metrics.annual_revenue(args.price),
        args.price
    );

    print_power_curve(&engine);

    if args.samples > 0 {
        let run = SampledRun::simulate(&engine, &model, args.samples, args.seed)?;
        print_sampled_run(&run);
    }

    Ok(())
}

fn print_power_curve(engine: &PowerCurveEngine) {
    let rated = engine.turbine().rated_power();
    println!("\nPower curve:");
    println!("  {:>6}  {:>10}  {:<12}", "m/s", "kW", "state");
    for sample in engine.curve_over(linspace(0.0, 30.0, 31)) {
        let bar = "#".repeat((sample.power / rated * 30.0).round() as usize);
        let state = format!("{:?}", sample.state);
        println!(
            "  {:>6.1}  {:>10.1}  {:<12} {}",
            *sample.speed,
            sample.power.to_kilowatts(),
            state,
            bar
        );
    }
}

fn print_sampled_run(run: &SampledRun) {
    println!("\nSampled run ({} draws, seed {}):", run.len(), run.seed);
    println!("  Mean wind speed:    {}", run.mean_speed);
    println!("  Mean power:         {}", run.mean_power);
    println!(
        "  Capacity factor:    {:.1}%",
        run.capacity_factor * 100.0
    );
    println!(
        "  Operating:          {:.1}% of draws",
        run.operating_fraction() * 100.0
    );

    let hist = run.wind_histogram(12);
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    println!("\n  Wind speed distribution:");
    for (edge, count) in hist.bins() {
        let bar = "#".repeat(count * 40 / peak);
        println!(
            "  {:>5.1}-{:<5.1} {:>6} {}",
            edge,
            edge + hist.bin_width(),
            count,
            bar
        );
    }
}

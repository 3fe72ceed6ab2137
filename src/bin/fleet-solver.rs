use std::error::Error;

use colored::Colorize;
use csv::Writer;
use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fleet_routing::fixtures::generate_scenario;
use fleet_routing::solver::{assemble, construct, Annealer, SolutionReport};
use fleet_routing::{build_problem, SolverConfig};

const NUM_VEHICLES: usize = 5;
const NUM_ORDERS: usize = 40;
const SCENARIO_SEED: u64 = 64;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = SolverConfig::default();
    info!(
        "Starting CVRPTW solver with {} vehicles, {} orders, {} iterations",
        NUM_VEHICLES, NUM_ORDERS, config.max_iterations
    );

    let (vehicles, orders) = generate_scenario(NUM_VEHICLES, NUM_ORDERS, SCENARIO_SEED);
    let problem = build_problem(vehicles, orders, config)?;

    let initial = {
        let setup_span = span!(Level::INFO, "construction");
        let _guard = setup_span.enter();
        construct(&problem)
    };
    info!("Initial solution cost: {:.2}", initial.cost);

    let mut annealer = Annealer::new(&problem, initial.clone());
    let best = annealer.run().clone();
    let report = assemble(&problem, &best);

    print_report(&report, initial.cost, best.cost);

    save_to_csv(annealer.best_updates(), "best_so_far.csv")?;

    if std::env::var("FLEET_JSON").is_ok() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn print_report(report: &SolutionReport, initial_cost: f64, final_cost: f64) {
    println!(
        "{}",
        format_args!(
            "Cost: {:.2} -> {:.2} ({:.1}% better)",
            initial_cost,
            final_cost,
            if initial_cost > 0.0 {
                (initial_cost - final_cost) / initial_cost * 100.0
            } else {
                0.0
            }
        )
        .to_string()
        .green()
    );
    println!(
        "Coverage: {}/{} orders ({:.0}%), total distance {:.1} km, wait {:.0} min",
        report.orders_assigned,
        report.orders_total,
        report.coverage * 100.0,
        report.totals.distance_m / 1_000.0,
        report.totals.wait_s / 60.0
    );

    for route in &report.routes {
        let stops: Vec<&str> = route.stops.iter().map(|s| s.order_id.as_str()).collect();
        println!(
            "{}: {:.0} kg ({:.0}% full), {:.1} km, {:.0} min : {:?}",
            route.vehicle_id,
            route.load_kg,
            route.load_factor * 100.0,
            route.distance_km,
            route.duration_min,
            stops
        );
    }

    for unassigned in &report.unassigned {
        println!(
            "{}",
            format_args!("UNASSIGNED {}: {}", unassigned.order_id, unassigned.reason)
                .to_string()
                .red()
        );
    }
}

fn save_to_csv(best_updates: &[(usize, f64)], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["iteration", "new_best_cost"])?;
    for (iteration, cost) in best_updates {
        wtr.write_record([iteration.to_string(), cost.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

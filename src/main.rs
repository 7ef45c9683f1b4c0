//! Climate Architect - command line front end
//!
//! Generates a plan for a site brief, optionally refines and audits it, then
//! writes the plan and radar SVGs and prints the summary panels.

use clap::{Parser, ValueEnum};
use climate_architect::controller::{Controller, Outcome};
use climate_architect::core::config::RenderConfig;
use climate_architect::core::error::{ArchitectError, Result};
use climate_architect::model::{Priority, SiteBrief};
use climate_architect::render::{self, report, Overlays};
use climate_architect::service::{DesignService, LlmDesignService, StubDesignService};

use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Overlay {
    Heat,
    Airflow,
    Daylight,
}

/// Climate-responsive floor plan designer
#[derive(Parser, Debug)]
#[command(name = "climate-architect")]
#[command(about = "Generate, refine and audit a climate-responsive floor plan")]
struct Args {
    /// Site location, e.g. "Phoenix, AZ"
    #[arg(long)]
    location: String,

    /// Plot dimensions, free text
    #[arg(long, default_value = "15m x 20m")]
    plot: String,

    /// Design priority
    #[arg(long, value_enum, default_value_t = Priority::Cooling)]
    priority: Priority,

    /// Free-text requirements
    #[arg(long, default_value = "")]
    brief: String,

    /// Refine the generated plan (and evaluate the result)
    #[arg(long)]
    refine: bool,

    /// Re-run the diagnostics audit on the final plan
    #[arg(long)]
    diagnose: bool,

    /// Diagnostic overlays to draw; repeat for several
    #[arg(long, value_enum)]
    overlay: Vec<Overlay>,

    /// Directory for plan.svg and radar.svg
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Render settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the built-in canned service instead of the remote endpoint
    #[arg(long)]
    offline: bool,

    /// Print the final session state as JSON instead of text panels
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overlays(&self) -> Overlays {
        Overlays {
            heat: self.overlay.contains(&Overlay::Heat),
            airflow: self.overlay.contains(&Overlay::Airflow),
            daylight: self.overlay.contains(&Overlay::Daylight),
        }
    }

    fn brief(&self) -> SiteBrief {
        SiteBrief::new(&self.location, &self.plot)
            .with_priority(self.priority)
            .with_requirements(&self.brief)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("climate_architect=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::from_file(path)?,
        None => RenderConfig::default(),
    };

    let rt = Runtime::new()?;

    if args.offline {
        tracing::info!("offline mode - using canned design service");
        rt.block_on(run(StubDesignService::new(), &args, &config))
    } else {
        let service = LlmDesignService::from_env()?;
        rt.block_on(run(service, &args, &config))
    }
}

async fn run<S: DesignService>(service: S, args: &Args, config: &RenderConfig) -> Result<()> {
    let controller = Controller::new(service);

    if controller.generate(&args.brief()).await? == Outcome::Applied {
        if args.refine && controller.state().controls().can_refine {
            controller.refine().await?;
        }
        if args.diagnose && controller.state().controls().can_diagnose {
            controller.diagnose().await?;
        }
    }

    let state = controller.into_state();

    if let Some(plan) = &state.plan {
        fs::create_dir_all(&args.out)?;
        let drawing = render::render_floor_plan(plan, args.overlays(), config);
        write_svg(&args.out.join("plan.svg"), &drawing.svg)?;
        if drawing.skipped_airflow > 0 {
            tracing::warn!(
                skipped = drawing.skipped_airflow,
                "airflow entries referenced unknown rooms"
            );
        }

        let previous = state.previous_plan.as_ref().map(|p| &p.metrics);
        let radar = render::render_radar(&plan.metrics, previous, config);
        write_svg(&args.out.join("radar.svg"), &radar)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", report::session_report(&state));
    }

    match state.error {
        Some(error) if state.plan.is_none() => Err(ArchitectError::LlmError(error)),
        _ => Ok(()),
    }
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg)?;
    tracing::info!(path = %path.display(), "wrote svg");
    Ok(())
}

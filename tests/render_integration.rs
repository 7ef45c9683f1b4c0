//! Renderer tests over plans produced by a full session

use climate_architect::controller::Controller;
use climate_architect::core::config::RenderConfig;
use climate_architect::model::{FloorPlan, HeatRisk, Level, SiteBrief};
use climate_architect::render::{render_floor_plan, render_radar, report, Overlays};
use climate_architect::service::StubDesignService;

async fn audited_plan() -> FloorPlan {
    let controller = Controller::new(StubDesignService::new());
    controller
        .generate(&SiteBrief::new("Phoenix", "20m x 15m"))
        .await
        .unwrap();
    controller.diagnose().await.unwrap();
    controller.state().plan.unwrap()
}

#[tokio::test]
async fn test_loose_labels_resolve_to_rooms() {
    let plan = audited_plan().await;
    let drawing = render_floor_plan(&plan, Overlays::all(), &RenderConfig::default());

    // storage (by id), kitchen (exact), bedroom -> Master Bedroom (partial)
    assert_eq!(drawing.heat_tints, 3);
    // Living -> Living Room (partial), Bathroom (by id)
    assert_eq!(drawing.daylight_tints, 2);
    // Kitchen -> Garage names no room and is left out
    assert_eq!(drawing.airflow_lines, 1);
    assert_eq!(drawing.skipped_airflow, 1);
    assert_eq!(drawing.svg.matches(r#"class="airflow""#).count(), 1);
}

#[tokio::test]
async fn test_overlays_off_draws_plain_plan() {
    let plan = audited_plan().await;
    let drawing = render_floor_plan(&plan, Overlays::none(), &RenderConfig::default());

    assert_eq!(drawing.heat_tints + drawing.daylight_tints + drawing.airflow_lines, 0);
    assert!(!drawing.svg.contains("overlay-heat"));
    for room in &plan.rooms {
        assert!(drawing.svg.contains(&room.name));
    }
}

#[tokio::test]
async fn test_canvas_matches_configured_scale() {
    let plan = audited_plan().await;
    let config = RenderConfig {
        scale: 20.0,
        padding: 10.0,
        ..RenderConfig::default()
    };
    let drawing = render_floor_plan(&plan, Overlays::none(), &config);

    let max_x = plan.rooms.iter().map(|r| r.x + r.width).fold(f64::MIN, f64::max);
    let min_x = plan.rooms.iter().map(|r| r.x).fold(f64::MAX, f64::min);
    assert!((drawing.width - ((max_x - min_x) * 20.0 + 20.0)).abs() < 1e-9);
}

#[test]
fn test_unmatched_heat_entry_skipped() {
    let plan = FloorPlan {
        title: "Cabin".into(),
        orientation: 0.0,
        rooms: vec![],
        total_area: 0.0,
        metrics: Default::default(),
        reasoning: String::new(),
        rejected_alternatives: vec![],
        diagnostics: Default::default(),
    };
    let mut plan = plan;
    plan.diagnostics.heat_risks.push(HeatRisk {
        room: "Sunroom".into(),
        room_id: None,
        risk: Level::High,
    });

    let drawing = render_floor_plan(&plan, Overlays::all(), &RenderConfig::default());
    assert_eq!(drawing.heat_tints, 0);
    assert!(drawing.svg.starts_with("<svg"));
}

#[tokio::test]
async fn test_refined_session_radar_and_report() {
    let controller = Controller::new(StubDesignService::new());
    controller
        .generate(&SiteBrief::new("Phoenix", "20m x 15m"))
        .await
        .unwrap();
    controller.refine().await.unwrap();
    let state = controller.state();

    let plan = state.plan.as_ref().unwrap();
    let previous = state.previous_plan.as_ref().map(|p| &p.metrics);
    let radar = render_radar(&plan.metrics, previous, &RenderConfig::default());
    assert!(radar.contains(r#"class="previous""#));
    assert!(radar.contains(&format!(">{}</text>", plan.metrics.overall_score())));

    let text = report::session_report(&state);
    assert!(text.contains("== Refinement =="));
    assert!(text.contains("== Optimization verdict =="));
    assert!(text.contains("Rejected alternatives"));
}

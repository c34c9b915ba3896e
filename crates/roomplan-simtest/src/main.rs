//! RoomPlan Headless Interaction Harness
//!
//! Validates floorplan geometry and gesture logic against a bundled sample
//! plan. Runs entirely in-process with no UI, no event loop and no storage.
//!
//! Usage:
//!   cargo run -p roomplan-simtest
//!   cargo run -p roomplan-simtest -- --verbose

use roomplan_logic::adjacency::{detect_adjacency, door_position};
use roomplan_logic::collision::overlapping_pairs;
use roomplan_logic::drag::DragSession;
use roomplan_logic::geometry::{effective_extents, room_bounds};
use roomplan_logic::measure::MeasureSession;
use roomplan_logic::resize::{compute_resize, ResizeHandle, ResizeSession};
use roomplan_logic::room::{Point, Room, RoomType, Rotation, RotationDirection};
use roomplan_logic::rotate::{pointer_angle, rotate_selected_room, snap_angle, RotateSession};
use roomplan_logic::session::SessionError;
use roomplan_logic::store::{Command, Floorplan, FloorplanStore};
use roomplan_logic::validation::{validate_floorplan, Severity};
use roomplan_logic::viewport::{Modifiers, PointerEvent, ScreenRect, TransformSettings, Viewport};

// ── Sample plan (bundled JSON) ──────────────────────────────────────────
const SAMPLE_PLAN_JSON: &str = include_str!("../../../data/sample_plan.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== RoomPlan Interaction Harness ===\n");

    let mut results = Vec::new();

    let plan = match serde_json::from_str::<Floorplan>(SAMPLE_PLAN_JSON) {
        Ok(p) => {
            results.push(TestResult {
                name: "plan_parse".into(),
                passed: true,
                detail: format!("'{}' with {} rooms", p.name, p.rooms().len()),
            });
            p
        }
        Err(e) => {
            println!("  ✗ plan_parse: JSON parse error: {}", e);
            std::process::exit(1);
        }
    };

    // 1. Plan validation
    results.extend(validate_sample_plan(&plan, verbose));

    // 2. Adjacency & connection refresh
    results.extend(validate_adjacency(&plan, verbose));

    // 3. Drag sessions
    results.extend(validate_drag(&plan, verbose));

    // 4. Resize math and sessions
    results.extend(validate_resize(&plan, verbose));

    // 5. Rotation
    results.extend(validate_rotation(&plan, verbose));

    // 6. Measurement tool
    results.extend(validate_measure());

    // 7. Plan commands
    results.extend(validate_commands(&plan));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn position_of(plan: &Floorplan, id: u32) -> Option<Point> {
    plan.room(id).map(|r| r.position)
}

// ── 1. Plan validation ──────────────────────────────────────────────────

fn validate_sample_plan(plan: &Floorplan, verbose: bool) -> Vec<TestResult> {
    println!("--- Plan Validation ---");
    let mut results = Vec::new();

    let findings = validate_floorplan(plan);
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    results.push(TestResult {
        name: "plan_no_errors".into(),
        passed: errors == 0,
        detail: format!("{} findings, {} errors", findings.len(), errors),
    });

    let overlaps = overlapping_pairs(plan.rooms());
    results.push(TestResult {
        name: "plan_no_overlaps".into(),
        passed: overlaps.is_empty(),
        detail: format!("{} overlapping pairs", overlaps.len()),
    });

    let rotated = plan
        .rooms()
        .iter()
        .filter(|r| r.rotation != Rotation::Deg0)
        .count();
    results.push(TestResult {
        name: "plan_has_rotated_room".into(),
        passed: rotated > 0,
        detail: format!("{} rotated rooms", rotated),
    });

    if verbose {
        for r in plan.rooms() {
            let b = room_bounds(r);
            println!(
                "  #{} {:<12} {:>5.2} x {:<5.2} @ {:>3}°  x[{:.2}, {:.2}] z[{:.2}, {:.2}]",
                r.id,
                r.name,
                r.length,
                r.width,
                r.rotation.degrees(),
                b.min_x,
                b.max_x,
                b.min_z,
                b.max_z
            );
        }
        for f in &findings {
            println!("  {:?} [{}] {}", f.severity, f.category, f.message);
        }
    }

    results
}

// ── 2. Adjacency ────────────────────────────────────────────────────────

fn validate_adjacency(plan: &Floorplan, verbose: bool) -> Vec<TestResult> {
    println!("--- Adjacency ---");
    let mut results = Vec::new();

    let mut plan = plan.clone();
    if let Err(e) = plan.apply(Command::RefreshConnections) {
        results.push(TestResult {
            name: "adjacency_refresh".into(),
            passed: false,
            detail: e.to_string(),
        });
        return results;
    }

    let auto: Vec<_> = plan.connections().iter().filter(|c| !c.is_manual).collect();
    let manual = plan.connections().len() - auto.len();
    results.push(TestResult {
        name: "adjacency_auto_count".into(),
        passed: auto.len() == 6,
        detail: format!("{} automatic connections (expected 6)", auto.len()),
    });
    results.push(TestResult {
        name: "adjacency_manual_kept".into(),
        passed: manual == 1,
        detail: format!("{} manual connections survive refresh", manual),
    });

    // Corner-touching rooms share no wall
    let corner_only = match (plan.room(1), plan.room(5)) {
        (Some(a), Some(b)) => detect_adjacency(a, b).is_none(),
        _ => false,
    };
    results.push(TestResult {
        name: "adjacency_corner_touch_ignored".into(),
        passed: corner_only,
        detail: "living/hallway meet at a single point".into(),
    });

    // Every door lands on its first room's boundary
    let mut misplaced = 0;
    for c in &auto {
        let door = plan.room(c.room1_id).and_then(|r| door_position(r, c));
        let on_edge = match (door, plan.room(c.room1_id)) {
            (Some(p), Some(r)) => {
                let b = room_bounds(r);
                b.contains(p)
                    && (approx(p.x, b.min_x)
                        || approx(p.x, b.max_x)
                        || approx(p.z, b.min_z)
                        || approx(p.z, b.max_z))
            }
            _ => false,
        };
        if !on_edge {
            misplaced += 1;
        }
    }
    results.push(TestResult {
        name: "adjacency_doors_on_walls".into(),
        passed: misplaced == 0,
        detail: format!("{} of {} doors off their wall", misplaced, auto.len()),
    });

    // Symmetry over every pair
    let rooms = plan.rooms();
    let mut asymmetric = 0;
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if detect_adjacency(a, b).is_some() != detect_adjacency(b, a).is_some() {
                asymmetric += 1;
            }
        }
    }
    results.push(TestResult {
        name: "adjacency_symmetric".into(),
        passed: asymmetric == 0,
        detail: format!("{} asymmetric pairs", asymmetric),
    });

    if verbose {
        for c in plan.connections() {
            println!(
                "  {:<12} #{} {:?} ↔ #{} {:?}  len {:?}",
                c.id, c.room1_id, c.room1_wall, c.room2_id, c.room2_wall, c.shared_wall_length
            );
        }
    }

    results
}

// ── 3. Drag ─────────────────────────────────────────────────────────────

fn validate_drag(plan: &Floorplan, verbose: bool) -> Vec<TestResult> {
    println!("--- Drag ---");
    let mut results = Vec::new();

    // Hallway nudged 40 px right, 3 px down: snaps to kitchen center and living bottom
    let mut p = plan.clone();
    let mut drag = DragSession::new(TransformSettings::default());
    let update = drag
        .begin(&mut p, 5, &PointerEvent::at(400.0, 300.0))
        .and_then(|_| drag.on_move(&mut p, &PointerEvent::at(440.0, 303.0)));
    let guides = update.as_ref().map(|u| u.guides.len()).unwrap_or(0);
    let outcome = drag.end(&mut p);
    let pos = position_of(&p, 5).unwrap_or_default();
    results.push(TestResult {
        name: "drag_alignment_snap".into(),
        passed: approx(pos.x, 6.75) && approx(pos.z, 4.0) && guides == 2,
        detail: format!("hallway at ({:.3}, {:.3}) with {} guides", pos.x, pos.z, guides),
    });
    results.push(TestResult {
        name: "drag_clean_drop".into(),
        passed: matches!(&outcome, Ok(o) if o.warning.is_none()),
        detail: "no overlap after snapped drop".into(),
    });

    // Bedroom pushed into the bathroom: warned, not rolled back
    let mut p = plan.clone();
    let mut drag = DragSession::new(TransformSettings::default());
    let outcome = drag
        .begin(&mut p, 3, &PointerEvent::at(0.0, 0.0))
        .and_then(|_| drag.on_move(&mut p, &PointerEvent::at(50.0, 0.0)))
        .and_then(|_| drag.end(&mut p));
    let reported = matches!(&outcome, Ok(o) if o.overlaps.contains(&(3, 4)) && o.warning.is_some());
    let kept = position_of(&p, 3).is_some_and(|pos| approx(pos.x, 1.0));
    results.push(TestResult {
        name: "drag_overlap_warned".into(),
        passed: reported && kept,
        detail: "bedroom/bathroom overlap reported, drop kept".into(),
    });

    // Multi-select keeps relative spacing
    let mut p = plan.clone();
    let spacing_before = match (position_of(&p, 1), position_of(&p, 2)) {
        (Some(a), Some(b)) => b.x - a.x,
        _ => f32::NAN,
    };
    let mut drag = DragSession::new(TransformSettings {
        snap_tolerance: 0.0,
        ..TransformSettings::default()
    });
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    let moved = p
        .apply(Command::SelectRoom(1))
        .map_err(SessionError::from)
        .and_then(|_| {
            drag.begin(
                &mut p,
                2,
                &PointerEvent::at(0.0, 0.0).with_modifiers(shift),
            )
        })
        .and_then(|_| drag.drag_by(&mut p, 0.0, -10.0))
        .and_then(|_| drag.end(&mut p))
        .map(|o| o.moved.len())
        .unwrap_or(0);
    let spacing_after = match (position_of(&p, 1), position_of(&p, 2)) {
        (Some(a), Some(b)) => b.x - a.x,
        _ => f32::NAN,
    };
    results.push(TestResult {
        name: "drag_multi_select".into(),
        passed: moved == 2 && approx(spacing_before, spacing_after),
        detail: format!("{} rooms moved, spacing {:.2} → {:.2}", moved, spacing_before, spacing_after),
    });

    if verbose {
        if let Ok(u) = &update {
            for g in &u.guides {
                println!(
                    "  guide {:?} at {:.2} from {:.2} to {:.2}",
                    g.orientation, g.offset, g.start, g.end
                );
            }
        }
    }

    results
}

// ── 4. Resize ───────────────────────────────────────────────────────────

fn validate_resize(plan: &Floorplan, verbose: bool) -> Vec<TestResult> {
    println!("--- Resize ---");
    let mut results = Vec::new();
    let settings = TransformSettings::default();

    let base = Room::new(1, "R", Point::new(0.0, 0.0)).with_size(5.0, 4.0);
    let ratio_base = Room::new(1, "R", Point::new(0.0, 0.0)).with_size(4.0, 3.0);
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    // (name, room, handle, dx, dz, modifiers, length, width, x, z)
    let cases = [
        ("resize_se", &base, ResizeHandle::SE, 1.0, 1.0, Modifiers::NONE, 6.0, 5.0, 0.0, 0.0),
        ("resize_nw", &base, ResizeHandle::NW, -1.0, -1.0, Modifiers::NONE, 6.0, 5.0, -1.0, -1.0),
        ("resize_ratio", &ratio_base, ResizeHandle::SE, 1.0, 0.0, shift, 5.0, 3.75, 0.0, 0.0),
        ("resize_center", &ratio_base, ResizeHandle::E, 1.0, 0.0, alt, 6.0, 3.0, -1.0, 0.0),
        ("resize_clamp_min", &ratio_base, ResizeHandle::W, 10.0, 0.0, Modifiers::NONE, 0.1, 3.0, 3.9, 0.0),
    ];
    for (name, room, handle, dx, dz, mods, l, w, x, z) in cases {
        let u = compute_resize(room, handle, dx, dz, mods, &settings);
        let ok = approx(u.length, l) && approx(u.width, w) && approx(u.position.x, x) && approx(u.position.z, z);
        results.push(TestResult {
            name: name.into(),
            passed: ok,
            detail: format!(
                "{:?}: {:.2} x {:.2} at ({:.2}, {:.2})",
                handle, u.length, u.width, u.position.x, u.position.z
            ),
        });
    }

    // Session on the plan: kitchen east edge out by 50 px
    let mut p = plan.clone();
    let mut resize = ResizeSession::new(settings);
    let outcome = resize
        .begin(&p, 2, ResizeHandle::E, &PointerEvent::at(450.0, 100.0))
        .and_then(|_| resize.on_move(&mut p, &PointerEvent::at(500.0, 100.0)))
        .and_then(|_| resize.end(&p));
    let ok = matches!(&outcome, Ok(o) if approx(o.length, 4.0) && o.warnings.is_empty());
    results.push(TestResult {
        name: "resize_session_kitchen".into(),
        passed: ok && overlapping_pairs(p.rooms()).is_empty(),
        detail: "kitchen 3 → 4 m, no overlaps".into(),
    });

    if verbose {
        for h in ResizeHandle::ALL {
            let u = compute_resize(&base, h, 0.5, 0.5, Modifiers::NONE, &settings);
            println!(
                "  {:?}: {:.2} x {:.2} at ({:.2}, {:.2})",
                h, u.length, u.width, u.position.x, u.position.z
            );
        }
    }

    results
}

// ── 5. Rotation ─────────────────────────────────────────────────────────

fn validate_rotation(plan: &Floorplan, verbose: bool) -> Vec<TestResult> {
    println!("--- Rotation ---");
    let mut results = Vec::new();

    let mut p = plan.clone();
    let mut seq = Vec::new();
    if p.apply(Command::SelectRoom(4)).is_ok() {
        for _ in 0..4 {
            match rotate_selected_room(&mut p, RotationDirection::Clockwise) {
                Ok(r) => seq.push(r.degrees()),
                Err(_) => break,
            }
        }
    }
    results.push(TestResult {
        name: "rotate_cw_cycle".into(),
        passed: seq == [180, 270, 0, 90],
        detail: format!("bathroom steps {:?}", seq),
    });

    let ccw = rotate_selected_room(&mut p, RotationDirection::CounterClockwise);
    let extents = p.room(4).map(effective_extents);
    results.push(TestResult {
        name: "rotate_ccw_swaps_extents".into(),
        passed: ccw == Ok(Rotation::Deg0) && extents == Some((3.0, 2.0)),
        detail: format!("{:?}, extents {:?}", ccw, extents),
    });

    // Handle drag: pointer straight right of the pivot → 90°
    let mut p = plan.clone();
    let viewport = Viewport::default();
    let rect = ScreenRect::default();
    let mut rotate = RotateSession::new();
    let result = rotate
        .begin(&p, 1, &viewport, &rect)
        .and_then(|_| {
            let (cx, cy) = rotate.pivot().unwrap_or_default();
            rotate.on_move(&mut p, &PointerEvent::at(cx + 80.0, cy))
        })
        .and_then(|_| rotate.end(&p));
    results.push(TestResult {
        name: "rotate_handle_drag".into(),
        passed: result == Ok((Rotation::Deg0, Rotation::Deg90)),
        detail: format!("{:?}", result),
    });

    if verbose {
        for deg in (0..360).step_by(45) {
            let rad = (deg as f32 - 90.0).to_radians();
            let snapped = snap_angle(pointer_angle(rad.cos(), rad.sin()));
            println!("  handle at {:>3}° → {:>3}°", deg, snapped.degrees());
        }
    }

    results
}

// ── 6. Measure ──────────────────────────────────────────────────────────

fn validate_measure() -> Vec<TestResult> {
    println!("--- Measure ---");
    let mut results = Vec::new();

    let mut m = MeasureSession::new(Viewport::default(), ScreenRect::default());
    m.click(&PointerEvent::at(0.0, 0.0));
    let done = m.click(&PointerEvent::at(150.0, 200.0));
    results.push(TestResult {
        name: "measure_distance".into(),
        passed: done.is_some_and(|d| approx(d.distance, 5.0)),
        detail: format!("{:?}", done.map(|d| d.distance)),
    });

    m.click(&PointerEvent::at(0.0, 0.0));
    m.cancel();
    results.push(TestResult {
        name: "measure_cancel".into(),
        passed: !m.is_active() && m.current().is_none(),
        detail: "escape drops the in-progress measurement".into(),
    });

    results
}

// ── 7. Commands ─────────────────────────────────────────────────────────

fn validate_commands(plan: &Floorplan) -> Vec<TestResult> {
    println!("--- Commands ---");
    let mut results = Vec::new();

    let mut p = plan.clone();
    let new_id = p.add_room("Closet".into(), RoomType::Closet, Point::new(20.0, 20.0));
    results.push(TestResult {
        name: "command_add_room_id".into(),
        passed: new_id == Ok(6),
        detail: format!("new room got id {:?}", new_id),
    });

    let refreshed = p.apply(Command::RefreshConnections).is_ok();
    let deleted = p.apply(Command::DeleteRoom(4)).is_ok();
    let dangling = p.connections().iter().filter(|c| c.involves(4)).count();
    results.push(TestResult {
        name: "command_delete_cleans_connections".into(),
        passed: refreshed && deleted && dangling == 0,
        detail: format!("{} connections still reference #4", dangling),
    });

    p.set_selection(vec![1, 99, 1, 2]);
    results.push(TestResult {
        name: "command_selection_filtered".into(),
        passed: p.selection() == [1, 2],
        detail: format!("selection {:?}", p.selection()),
    });

    let self_link = p.apply(Command::AddManualConnection {
        room1_id: 2,
        room2_id: 2,
    });
    results.push(TestResult {
        name: "command_self_connection_rejected".into(),
        passed: self_link.is_err(),
        detail: format!("{:?}", self_link),
    });

    results
}

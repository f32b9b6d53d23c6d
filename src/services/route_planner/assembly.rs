use super::trim::trim;
use crate::constants::{CORNER_LABELS, LOOP_LEG_COUNT};
use crate::models::{Coordinates, CornerMarker, RouteLeg, RoutePlan, RouteStep, StopMarker};

/// Combine four fetched legs into a plan.
///
/// `vertices` are the loop vertices in visiting order: center, A, B, C.
pub fn assemble_plan(
    legs: [RouteLeg; LOOP_LEG_COUNT],
    vertices: [Coordinates; LOOP_LEG_COUNT],
    stop_count: i64,
) -> RoutePlan {
    // Plans are titled after the second leg
    let title = legs[1].name.clone();

    let est_distance: f64 = legs.iter().map(|leg| leg.distance_meters).sum();
    let est_time: f64 = legs.iter().map(|leg| leg.duration_seconds).sum();

    let combined: Vec<Coordinates> = legs
        .iter()
        .flat_map(|leg| leg.polyline.iter().copied())
        .collect();
    let stop_annotations = numbered_markers(trim(&combined, stop_count).into_iter());

    let steps = kept_steps(&legs);
    let step_directions = steps
        .iter()
        .filter(|step| !step.instructions.is_empty())
        .map(|step| step.instructions.clone())
        .collect();
    let step_annotations = numbered_markers(steps.iter().map(|step| step.coordinate))
        .into_iter()
        .zip(&steps)
        .map(|(marker, step)| {
            if step.instructions.is_empty() {
                marker
            } else {
                marker.with_subtitle(step.instructions.clone())
            }
        })
        .collect();

    let corners = CORNER_LABELS
        .iter()
        .zip(vertices)
        .map(|(label, coordinate)| CornerMarker {
            title: label.to_string(),
            coordinate,
        })
        .collect();

    let step_polylines = legs.into_iter().map(|leg| leg.polyline).collect();

    RoutePlan {
        title,
        step_directions,
        step_annotations,
        step_polylines,
        stop_annotations,
        corners,
        est_distance,
        est_time,
    }
}

/// All steps in leg order. Each leg but the last ends on the step the next
/// leg starts with, so that final step is dropped.
fn kept_steps(legs: &[RouteLeg]) -> Vec<&RouteStep> {
    let last_leg = legs.len().saturating_sub(1);

    legs.iter()
        .enumerate()
        .flat_map(|(i, leg)| {
            let steps = if i < last_leg {
                leg.steps.split_last().map_or(&[][..], |(_, rest)| rest)
            } else {
                &leg.steps[..]
            };
            steps.iter()
        })
        .collect()
}

/// Markers titled "1".."N" with order indices 1..N
fn numbered_markers(coordinates: impl Iterator<Item = Coordinates>) -> Vec<StopMarker> {
    coordinates
        .enumerate()
        .map(|(i, coordinate)| {
            let number = i as u32 + 1;
            StopMarker::new(number.to_string(), coordinate).with_order_index(number)
        })
        .collect()
}

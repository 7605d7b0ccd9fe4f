// Example usage of the C3D reader: decode one capture and log a summary

use anyhow::Context;
use c3d_reader::utils::conf_helper::log_level;
use c3d_reader::{load_config, MotionFile};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inspect.json".to_string());
    let config = load_config(&config_path)?;

    tracing_subscriber::fmt()
        .with_max_level(log_level(&config)?)
        .init();

    let motion = MotionFile::open(&config.input)
        .with_context(|| format!("decoding {}", config.input.display()))?;

    let header = motion.header();
    info!(
        "Frames {}..={} ({} total) at {} Hz",
        header.first_frame,
        header.last_frame,
        motion.frame_count(),
        header.frame_rate
    );
    if config.dump_header_json {
        info!("Header: {}", serde_json::to_string_pretty(header)?);
    }

    info!("Groups:");
    for (id, group) in motion.groups() {
        info!("  [{}] {} ({} parameters)", id, group.name, group.parameters.len());
        if !group.description.is_empty() {
            info!("      Description: {}", group.description);
        }
    }

    match motion.subject_prefix() {
        Some(subject) => info!("Subject: {}", subject),
        None => info!("No subject prefix on rotation labels"),
    }

    for segment in motion.segments() {
        let wanted = config.segments.is_empty()
            || config
                .segments
                .iter()
                .any(|s| s.eq_ignore_ascii_case(segment.name));
        if !wanted {
            continue;
        }

        let origins = segment.stream.origins();
        match (origins.first(), origins.last()) {
            (Some(first), Some(last)) => info!(
                "  {}: first origin {:?}, last origin {:?}",
                segment.name, first, last
            ),
            _ => info!("  {}: no frames", segment.name),
        }
        match motion.segment_length(segment.name) {
            Some(length) => info!("      Length: {}", length),
            None => warn!("      No stored length for {}", segment.name),
        }
    }

    Ok(())
}

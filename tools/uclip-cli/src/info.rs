//! Clip inspection output.

use std::ops::Range;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use uclip_common::{bitset, load_clip, ClipView, TRACKS_PER_BONE};

#[derive(Args)]
pub struct InfoArgs {
    /// Input .uclip file
    pub input: PathBuf,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let bytes = load_clip(&args.input)?;
    let view = ClipView::parse(&bytes)?;

    let header = view.header();
    let layout = view.layout();
    let num_tracks = header.num_bones as u32 * TRACKS_PER_BONE;
    let num_default = bitset::count_set(view.default_tracks_bitset(), num_tracks);
    let num_constant = bitset::count_set(view.constant_tracks_bitset(), num_tracks);

    println!("{}", args.input.display());
    println!();
    println!("Envelope:");
    println!("  version:      {}", view.envelope().version);
    println!("  total size:   {} bytes", view.envelope().total_size);
    println!("  payload hash: {:#010x}", view.envelope().hash);
    println!();
    println!("Header:");
    println!("  bones:        {}", header.num_bones);
    println!("  rotations:    {}", header.rotation_format.name());
    println!("  translations: {}", header.translation_format.name());
    println!(
        "  samples:      {} @ {} Hz",
        header.num_samples, header.sample_rate
    );
    println!();
    println!("Tracks ({} total):", num_tracks);
    println!("  default:      {}", num_default);
    println!("  constant:     {}", num_constant);
    println!(
        "  animated:     {}",
        num_tracks.saturating_sub(num_default + num_constant)
    );
    println!();
    println!("Regions:");
    print_region("default bitset", &layout.default_tracks_bitset);
    print_region("constant bitset", &layout.constant_tracks_bitset);
    print_region("constant data", &layout.constant_track_data);
    print_region("track data", &layout.track_data);

    Ok(())
}

fn print_region(name: &str, range: &Range<usize>) {
    println!(
        "  {:<16} {:#06x}..{:#06x} ({} bytes)",
        name,
        range.start,
        range.end,
        range.len()
    );
}

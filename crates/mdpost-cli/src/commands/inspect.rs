use crate::cli::InspectArgs;
use crate::error::Result;
use mdpost::core::models::trajectory::Trajectory;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let mut trajectory = Trajectory::new(args.format.build_reader(args.precision));
    for source in &args.trajectory {
        trajectory.attach(source);
    }

    info!("Reading {} trajectory source(s)...", args.trajectory.len());
    trajectory.frames()?;
    let frames = trajectory.loaded_frames()?;

    println!("Frames:    {}", frames.len());
    println!("Particles: {}", trajectory.n_particles());

    let names: Vec<&str> = (0..trajectory.num_types())
        .filter_map(|index| trajectory.type_name(index))
        .collect();
    println!("Types:     {} ({})", names.len(), names.join(", "));

    let times: Vec<f64> = frames.iter().filter_map(|frame| frame.time()).collect();
    match (times.first(), times.last()) {
        (Some(first), Some(last)) => println!("Time span: {:.4} to {:.4}", first, last),
        _ => println!("Time span: not recorded"),
    }

    if let Some(cell) = frames.first().and_then(|frame| frame.cell()) {
        println!("Box volume of first frame: {:.4}", cell.volume());
    }

    Ok(())
}

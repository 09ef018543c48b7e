use bmd_camera::{CameraConfig, CameraControl, HttpCamera};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let camera = HttpCamera::new(CameraConfig::from_env()?)?;

    let state = camera.toggle_record("").await?;
    println!("recording: {}", state.recording);

    Ok(())
}

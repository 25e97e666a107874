use discrete_systems::plant::{self, DEFAULT_PLANT_PERIOD};
use discrete_systems::{
    AdcSystem, DacSystem, ExportFormat, PidSystem, Signal, StepWave, COLLABORATOR_BUFFER_SIZE,
};
use std::error::Error;
use std::path::PathBuf;

/// Closed loop: reference -> error -> PID -> DAC -> motor -> ADC -> feedback
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("Discrete-time closed loop");
    println!("=========================\n");

    let ts = DEFAULT_PLANT_PERIOD;
    let duration = 3.0;
    let steps = (duration / ts).round() as usize;

    let mut reference = Signal::new(StepWave::new(1.0, 0.1), ts, 0.0, COLLABORATOR_BUFFER_SIZE)?;
    let mut pid = PidSystem::pid_default(1.0, 5.0, 0.0, ts)?;
    let mut dac = DacSystem::dac_default(ts)?;
    let mut motor = plant::motor_default()?;
    let mut adc = AdcSystem::adc_default(ts)?;

    println!("Reference: unit step at t = 0.1 s");
    println!(
        "PID: Kp={}, Ki={}, Kd={}, Ts={} s",
        pid.realization().kp(),
        pid.realization().ki(),
        pid.realization().kd(),
        ts
    );
    println!("{}", motor);

    println!("{:>8} | {:>10} | {:>10} | {:>10}", "t", "r", "u", "y");
    println!("{}", "-".repeat(47));

    let mut feedback = 0.0;
    for k in 0..steps {
        let t = reference.time();
        let r = reference.next();
        let u = pid.step(r - feedback);
        let y = motor.step(dac.step(u));
        feedback = adc.step(y);

        if k % 25 == 0 {
            println!("{:>8.3} | {:>10.6} | {:>10.6} | {:>10.6}", t, r, u, y);
        }
    }

    if let Some(last) = motor.history().latest() {
        println!("\nFinal plant output after {} steps: {:.6}", motor.step_count(), last.output);
    }

    // Optional export directory as first argument
    if let Some(dir) = std::env::args().nth(1).map(PathBuf::from) {
        std::fs::create_dir_all(&dir)?;
        for format in [ExportFormat::Tsv, ExportFormat::Matlab] {
            let path = dir.join(format!("plant.{}", format.extension()));
            motor.save(&path, format)?;
            println!("Saved {}", path.display());
        }

        let path = dir.join("reference.csv");
        reference.write_csv(std::fs::File::create(&path)?)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

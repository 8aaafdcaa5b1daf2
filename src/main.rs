fn main() {
    if let Err(e) = clinic_intake_lib::run() {
        eprintln!("clinic-intake: {e}");
        std::process::exit(1);
    }
}

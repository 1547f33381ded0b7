const DRIVER_NAMES: &[&str] = &["DEBUG"];

fn driver_name_to_feature_name(driver_name: &str) -> String {
    format!("driver-{}", driver_name.to_lowercase().replace('_', "-"))
}

fn main() -> Result<(), String> {
    let names: Vec<&str> = DRIVER_NAMES
        .iter()
        .copied()
        .filter(|name| std::env::var(format!("CARGO_FEATURE_DRIVER_{name}")).is_ok())
        .collect();

    match names.len() {
        1 => Ok(()),
        _ => {
            let names: Vec<String> = names.into_iter().map(driver_name_to_feature_name).collect();
            let options: Vec<String> = DRIVER_NAMES
                .iter()
                .copied()
                .map(driver_name_to_feature_name)
                .collect();

            Err(format!(
                "ww-app must be built with EXACTLY ONE driver feature enabled. Got features: [{}]. Options are: [{}]",
                names.join(", "),
                options.join(", "),
            ))
        }
    }
}

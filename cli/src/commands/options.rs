use anyhow::Result;
use agrimap::{distinct_values, FilterOptions, PickerOption};

use super::{load_config, load_dataset};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::OptionsArgs) -> Result<()> {
    let config = load_config(cli)?;
    let data = load_dataset(&args.data, &config)?;
    let options = FilterOptions::from_distinct(&distinct_values(data.regions()));

    print_picker("Kabupaten", &options.areas);
    print_picker("Komoditas", &options.commodities);
    Ok(())
}

fn print_picker(title: &str, options: &[PickerOption]) {
    println!("{title}:");
    for option in options {
        if option.value == option.label {
            println!("  {}", option.label);
        } else {
            println!("  {} ({})", option.label, option.value);
        }
    }
}

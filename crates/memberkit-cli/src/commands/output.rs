use colored::Colorize;
use memberkit_core::profile::{ProfileField, ProfileRecord};

fn or_unset(value: &str) -> String {
    if value.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

pub fn print_profile(record: &ProfileRecord) {
    println!("{}", "Profile".bold());
    for field in ProfileField::ALL {
        println!("  {:<10} {}", field.wire_name().cyan(), or_unset(record.get(field)));
    }
}

pub fn print_display_token(record: &ProfileRecord, display_token: Option<&str>) {
    match display_token {
        Some(value) if record.has_token() => {
            println!("  {:<10} {}", "qr_token".cyan(), value.green());
        }
        Some(value) => {
            println!(
                "  {:<10} {} {}",
                "qr_token".cyan(),
                value.yellow(),
                "(token unavailable, using member ID)".dimmed()
            );
        }
        None => println!("  {:<10} {}", "qr_token".cyan(), or_unset("")),
    }
}

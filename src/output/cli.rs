use crate::model::{BlacklistStatus, MalwareStatus, SecurityScanResult};
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    check: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Details")]
    details: String,
}

fn malware_status(status: MalwareStatus) -> &'static str {
    match status {
        MalwareStatus::Clean => "clean",
        MalwareStatus::Infected => "infected",
        MalwareStatus::Suspicious => "suspicious",
        MalwareStatus::Scanning => "scanning",
        MalwareStatus::Error => "error",
    }
}

fn blacklist_status(status: BlacklistStatus) -> &'static str {
    match status {
        BlacklistStatus::Clean => "clean",
        BlacklistStatus::Blacklisted => "blacklisted",
        BlacklistStatus::Checking => "checking",
        BlacklistStatus::Error => "error",
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub fn print_cli_table(result: &SecurityScanResult) -> Result<()> {
    println!();
    println!(
        "Scan completed at: {}",
        result.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    let rows = vec![
        CheckRow {
            check: "Malware".to_string(),
            status: malware_status(result.malware_scan.status).to_string(),
            details: format!("{} threat(s)", result.malware_scan.threats_detected),
        },
        CheckRow {
            check: "Blacklist".to_string(),
            status: blacklist_status(result.blacklist_check.status).to_string(),
            details: format!(
                "{} service(s) checked, {} flagged",
                result.blacklist_check.services_checked.len(),
                result.blacklist_check.flagged_by.len()
            ),
        },
        CheckRow {
            check: "Vulnerabilities".to_string(),
            status: if result.vulnerability_scan.total() == 0 {
                "clean".to_string()
            } else {
                format!("{} found", result.vulnerability_scan.total())
            },
            details: format!(
                "core {}, plugins {}, themes {}",
                result.vulnerability_scan.core_vulnerabilities,
                result.vulnerability_scan.plugin_vulnerabilities,
                result.vulnerability_scan.theme_vulnerabilities
            ),
        },
        CheckRow {
            check: "Security headers".to_string(),
            status: format!(
                "{}/7 present",
                7 - result.security_headers.missing_count()
            ),
            details: format!("{} missing", result.security_headers.missing_count()),
        },
        CheckRow {
            check: "SSL".to_string(),
            status: yes_no(result.ssl_enabled),
            details: String::new(),
        },
        CheckRow {
            check: "WP version hidden".to_string(),
            status: yes_no(result.wp_version_hidden),
            details: String::new(),
        },
        CheckRow {
            check: "Security plugins".to_string(),
            status: format!("{} active", result.security_plugins_active.len()),
            details: result.security_plugins_active.join(", "),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    // Outdated software, if any
    if !result.vulnerability_scan.outdated_software.is_empty() {
        println!();
        println!("Outdated software:");
        for entry in &result.vulnerability_scan.outdated_software {
            println!(
                "  [{}] {} {} -> {}",
                entry.severity, entry.name, entry.current_version, entry.latest_version
            );
        }
    }

    println!();
    println!("Score breakdown:");
    for line in &result.score_breakdown {
        println!("  {}", line);
    }

    println!();
    println!(
        "Overall security score: {}/100 ({}s)",
        result.overall_score, result.scan_duration_secs
    );
    Ok(())
}

//! Output formatting module

use std::io::Write;

use carrent_app::app::{format_due_date, FleetRow, RenterSummary};
use carrent_domain::service::{RentReceipt, ReturnReceipt};
use carrent_types::{OutputFormat, Result};

fn write_vehicle_header<W: Write>(out: &mut W, last_column: &str) -> Result<()> {
    writeln!(
        out,
        "{:>3}{:>15}{:>15}{:>7}{:>12}{:>6}{:>10}{:>10}{:>10}{:>15}",
        "ID", "Brand", "Model", "Rent", "Price", "Seats", "Color", "Available", "Condition", last_column
    )?;
    Ok(())
}

fn write_vehicle_row<W: Write>(out: &mut W, row: &FleetRow) -> Result<()> {
    writeln!(
        out,
        "{:>3}{:>15}{:>15}{:>7}{:>12}{:>6}{:>10}{:>10}{:>10}{:>15}",
        row.id,
        row.brand,
        row.model,
        row.daily_rate,
        row.market_price,
        row.seats,
        row.color,
        if row.available { "Yes" } else { "No" },
        row.condition,
        row.due.label()
    )?;
    Ok(())
}

/// Print the whole fleet
pub fn write_fleet<W: Write>(out: &mut W, rows: &[FleetRow], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
        return Ok(());
    }

    write_vehicle_header(out, "Due Date")?;
    for row in rows {
        write_vehicle_row(out, row)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print the vehicles one renter holds
pub fn write_held<W: Write>(out: &mut W, rows: &[FleetRow], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "No vehicles currently rented\n")?;
        return Ok(());
    }

    write_vehicle_header(out, "Return By")?;
    for row in rows {
        write_vehicle_row(out, row)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print client or staff accounts with what they hold
pub fn write_renters<W: Write>(
    out: &mut W,
    renters: &[RenterSummary],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(renters)?)?;
        return Ok(());
    }

    writeln!(out, "ID\tName\tDues\tRating")?;
    for renter in renters {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            renter.id, renter.name, renter.dues, renter.reputation
        )?;
        writeln!(out, "\tRented Vehicles:")?;
        for vehicle in &renter.rented_vehicles {
            writeln!(out, "\t{}", vehicle)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_rent_receipt<W: Write>(out: &mut W, receipt: &RentReceipt) -> Result<()> {
    if receipt.charge < receipt.vehicle.daily_rate {
        writeln!(out, "Vehicle rented successfully (Employee discount applied)")?;
    } else {
        writeln!(out, "Vehicle rented successfully")?;
    }
    writeln!(out, "Charged:         {}", receipt.charge)?;
    writeln!(out, "Return by:       {}", format_due_date(receipt.due_at))?;
    writeln!(out, "Balance:         {}\n", receipt.balance)?;
    Ok(())
}

pub fn write_return_receipt<W: Write>(out: &mut W, receipt: &ReturnReceipt) -> Result<()> {
    if receipt.penalty.overdue_units > 0 {
        writeln!(
            out,
            "Late return penalty applied: {} ({} period(s) overdue)",
            receipt.penalty.fee, receipt.penalty.overdue_units
        )?;
    }
    writeln!(out, "Vehicle returned successfully")?;
    writeln!(out, "Balance:         {}\n", receipt.balance)?;
    Ok(())
}

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::filter::FilterCriteria;
use crate::state::Session;

const DEFAULT_EXPORT_PATH: &str = "listings_export.json";

const MENU: &str = "\
  1) Filter listings
  2) Compute statistics
  3) Rank hosts by listing count
  4) Filter by host location
  5) Export snapshot
  6) Exit";

// ---------------------------------------------------------------------------
// Interactive menu loop
// ---------------------------------------------------------------------------

/// Run the menu loop until the user exits or the input stream ends.
///
/// The loop only reads from `input` and writes to `output`, so production
/// runs on stdin/stdout while tests script it over byte buffers. Invalid
/// selections are reported and the menu re-prompts; export failures
/// propagate out of the loop.
pub fn run(session: &mut Session, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "{} listings in the current view", session.table().len())?;
        writeln!(output, "{MENU}")?;

        let Some(choice) = prompt(&mut input, &mut output, "Select an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => filter_listings(session, &mut input, &mut output)?,
            "2" => {
                let stats = session.compute_stats();
                writeln!(output, "{} listings", stats.count)?;
                for (bedrooms, avg) in &stats.avg_price_per_bedroom {
                    writeln!(output, "  {bedrooms} bedroom(s): ${avg:.2} average")?;
                }
            }
            "3" => {
                for (host, count) in session.rank_hosts() {
                    writeln!(output, "  {host}: {count} listing(s)")?;
                }
            }
            "4" => {
                let Some(needle) = prompt(&mut input, &mut output, "Host location contains: ")?
                else {
                    break;
                };
                session.filter_host_location(needle.trim());
                writeln!(output, "{} listings match", session.table().len())?;
            }
            "5" => {
                let Some(destination) = prompt(
                    &mut input,
                    &mut output,
                    &format!("Export to [{DEFAULT_EXPORT_PATH}]: "),
                )?
                else {
                    break;
                };
                let destination = match destination.trim() {
                    "" => DEFAULT_EXPORT_PATH,
                    other => other,
                };
                session.export(Path::new(destination))?;
                writeln!(output, "Snapshot written to {destination}")?;
            }
            "6" => {
                writeln!(output, "Bye.")?;
                break;
            }
            other => writeln!(output, "Unrecognized option '{other}'.")?,
        }
    }
    Ok(())
}

/// Prompt for the four filter constraints. A blank answer, or one that
/// does not parse as a number, leaves that constraint unset.
fn filter_listings(
    session: &mut Session,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let mut criteria = FilterCriteria::default();

    let Some(answer) = prompt(input, output, "Max price: ")? else {
        return Ok(());
    };
    criteria.max_price = answer.trim().parse().ok();

    let Some(answer) = prompt(input, output, "Room type: ")? else {
        return Ok(());
    };
    if !answer.trim().is_empty() {
        criteria.room_type = Some(answer.trim().to_string());
    }

    let Some(answer) = prompt(input, output, "Bedrooms: ")? else {
        return Ok(());
    };
    criteria.bedrooms = answer.trim().parse().ok();

    let Some(answer) = prompt(input, output, "Min review score: ")? else {
        return Ok(());
    };
    criteria.min_rating = answer.trim().parse().ok();

    session.apply_filter(&criteria);
    writeln!(output, "{} listings match", session.table().len())?;
    Ok(())
}

/// Write `message`, flush, and read one line. `None` means the input
/// stream ended.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}").context("writing prompt")?;
    output.flush().context("flushing prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

use clap::Parser;
use cutlist::allocator::Allocator;
use cutlist::render;
use cutlist::summary;
use cutlist::types::{DemandItem, StockSpec};
use cutlist::units::to_feet_inches;
use cutlist::{inventory, types::StockPool};

#[derive(Parser)]
#[command(name = "cutlist", about = "1D linear cutting stock optimizer")]
struct Cli {
    /// Stock pieces as LENGTH:QTY (e.g. 96:2 144:1)
    #[arg(long = "stock", num_args = 1.., conflicts_with_all = ["inventory", "stock_length"])]
    stock: Vec<String>,

    /// Total linear inventory to divide into equal sticks
    #[arg(long, requires = "stock_length")]
    inventory: Option<f64>,

    /// Stick length used with --inventory
    #[arg(long)]
    stock_length: Option<f64>,

    /// Cut pieces as LENGTH:QTY:LABEL[:JOB[:SEQ]] (e.g. 50:1:Rail)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<String>,

    /// Show ASCII bar of each used layout
    #[arg(long)]
    layout: bool,

    /// Display lengths as feet and inches
    #[arg(long)]
    feet_inches: bool,
}

fn parse_stock(s: &str) -> Result<StockSpec, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("invalid stock '{}', expected LENGTH:QTY", s));
    }
    let length = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let qty = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if length <= 0.0 {
        return Err(format!("stock length must be positive in '{}'", s));
    }
    Ok(StockSpec::new(length, qty))
}

fn parse_cut(s: &str) -> Result<DemandItem, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 3 || parts.len() > 5 {
        return Err(format!(
            "invalid cut '{}', expected LENGTH:QTY:LABEL[:JOB[:SEQ]]",
            s
        ));
    }
    let length = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let qty = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if length <= 0.0 {
        return Err(format!("cut length must be positive in '{}'", s));
    }
    if qty == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let mut item = DemandItem::new(length, qty, parts[2]);
    if parts.len() >= 4 {
        item.job = parts[3].to_string();
    }
    if parts.len() == 5 {
        item.sequence = parts[4].to_string();
    }
    Ok(item)
}

/// Layout A, B, ... Z, then 27, 28, ... for big pools.
fn layout_name(i: usize) -> String {
    if i < 26 {
        ((b'A' + i as u8) as char).to_string()
    } else {
        (i + 1).to_string()
    }
}

fn main() {
    let cli = Cli::parse();

    let fmt_len = |v: f64| -> String {
        if cli.feet_inches {
            to_feet_inches(v)
        } else {
            format!("{v}")
        }
    };

    let pool_result = if let (Some(total), Some(stick)) = (cli.inventory, cli.stock_length) {
        inventory::build_pool_from_inventory(total, stick)
    } else {
        if cli.stock.is_empty() {
            eprintln!("Error: no stock given, use --stock or --inventory");
            std::process::exit(1);
        }
        let specs: Vec<StockSpec> = cli
            .stock
            .iter()
            .map(|s| parse_stock(s))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
        inventory::build_pool(&specs)
    };
    let pool: StockPool = pool_result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let demands: Vec<DemandItem> = cli
        .cuts
        .iter()
        .map(|c| parse_cut(c))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let total_demand: u32 = demands.iter().map(|d| d.qty).sum();
    let pool_size = pool.len();

    let result = Allocator::new(pool, demands)
        .allocate()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    // Output results, skipping sticks that received nothing
    for (i, layout) in result.layouts.iter().enumerate() {
        if layout.is_empty() {
            continue;
        }
        let s = summary::summarize(layout).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        println!("Layout {}:", layout_name(i));
        println!("  Stock length: {}", fmt_len(s.stock_length));
        for g in &s.groups {
            let refs = match (g.job.is_empty(), g.sequence.is_empty()) {
                (true, true) => String::new(),
                (false, true) => format!(" [{}]", g.job),
                (true, false) => format!(" [{}]", g.sequence),
                (false, false) => format!(" [{} / {}]", g.job, g.sequence),
            };
            println!("  {} x {} @ {}{}", g.qty, g.label, fmt_len(g.length), refs);
        }
        println!("  Remnant: {}", fmt_len(s.waste));
        if cli.layout {
            print!("{}", render::render_layout(layout));
        }
        println!();
    }

    println!(
        "Summary: {} of {} stock piece{} used, {} of {} cut{} placed, total remnant {}",
        result.used_count(),
        pool_size,
        if pool_size == 1 { "" } else { "s" },
        result.placed_count(),
        total_demand,
        if total_demand == 1 { "" } else { "s" },
        fmt_len(result.total_waste()),
    );
    if result.unplaced > 0 {
        eprintln!(
            "Warning: {} cut{} did not fit in the available stock",
            result.unplaced,
            if result.unplaced == 1 { "" } else { "s" },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stock() {
        let s = parse_stock("96:2").unwrap();
        assert_eq!(s.length, 96.0);
        assert_eq!(s.qty, 2);
        assert!(parse_stock("96").is_err());
        assert!(parse_stock("0:2").is_err());
        assert!(parse_stock("96:x").is_err());
    }

    #[test]
    fn test_parse_cut() {
        let c = parse_cut("50.5:3:Rail").unwrap();
        assert_eq!(c.length, 50.5);
        assert_eq!(c.qty, 3);
        assert_eq!(c.label, "Rail");
        assert!(c.job.is_empty());

        let c = parse_cut("24:1:Stile:J7:S2").unwrap();
        assert_eq!(c.job, "J7");
        assert_eq!(c.sequence, "S2");

        assert!(parse_cut("50:1").is_err());
        assert!(parse_cut("50:0:Rail").is_err());
        assert!(parse_cut("-1:2:Rail").is_err());
    }

    #[test]
    fn test_layout_name() {
        assert_eq!(layout_name(0), "A");
        assert_eq!(layout_name(25), "Z");
        assert_eq!(layout_name(26), "27");
    }
}

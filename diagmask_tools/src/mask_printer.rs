use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use diagmask::{Bitboard, BitboardPrinter, File, Layout, MaskKind, Square};
use log::{debug, info};

/// Prints the diagonal or anti-diagonal mask of a square as an 8x8 grid of 0s and 1s.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Square to compute the mask for, as an index (`0`..`63`) or in algebraic notation (`e4`)
    square: String,

    /// Which line through the square to compute (`diagonal` or `anti-diagonal`)
    #[arg(short, long, default_value_t = MaskKind::Diagonal)]
    kind: MaskKind,

    /// Leave the square itself out of the mask
    #[arg(short = 'x', long)]
    exclude_self: bool,

    /// Rank order of the grid (`index` puts a1..h1 on the first line, `board` puts rank 8 first)
    #[arg(short, long, default_value = "index")]
    layout: Layout,

    /// Also print the mask as a hexadecimal number
    #[arg(long)]
    hex: bool,

    /// Highlight set squares and the source square in color
    #[arg(short, long)]
    color: bool,
}

/// Prints the grid line by line, coloring set squares and the source square.
fn print_colored(printer: &BitboardPrinter, mask: Bitboard, square: Square) {
    for rank in printer.ranks() {
        let line = File::iter()
            .map(|file| {
                let current = Square::new(file, rank);
                let symbol = printer.symbol(current).to_string();
                let symbol = if current == square {
                    symbol.yellow().bold()
                } else if mask.get(current) {
                    symbol.green()
                } else {
                    symbol.dimmed()
                };
                symbol.to_string()
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line} ");
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("{args:?}");

    let square: Square = args
        .square
        .parse()
        .context(format!("Failed to parse {:?} as a square", args.square))?;

    let include_self = !args.exclude_self;
    let mask = diagmask::mask_for_index(args.kind, square.index(), include_self)?;
    info!(
        "{} mask for {square} ({} squares)",
        args.kind,
        mask.population()
    );

    let printer = BitboardPrinter::new(mask).layout(args.layout);
    if args.color {
        print_colored(&printer, mask, square);
    } else {
        print!("{printer}");
    }

    if args.hex {
        println!("{mask:#018X}");
    }

    Ok(())
}

use macroquad::prelude::*;

use diagmask::{Bitboard, BitboardPrinter, File, Layout, MaskKind, Rank, Square};

/// Which lines through the selected square are shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ViewMode {
    Only(MaskKind),
    Both,
}

impl ViewMode {
    fn mask(&self, square: Square, include_self: bool) -> Bitboard {
        match self {
            Self::Only(kind) => kind.mask(square, include_self),
            Self::Both => {
                MaskKind::Diagonal.mask(square, include_self)
                    | MaskKind::AntiDiagonal.mask(square, include_self)
            }
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Only(kind) => kind.to_string(),
            Self::Both => String::from("diagonal + anti-diagonal"),
        }
    }
}

fn draw_centered_text(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    let center = get_text_center(text, None, font_size as u16, 1.0, 0.0);
    draw_text(text, x - center.x, y - center.y, font_size, color);
}

fn parse_args() -> Square {
    let Some(arg) = std::env::args().nth(1) else {
        return Square::E4;
    };

    match arg.parse() {
        Ok(square) => square,
        Err(e) => {
            eprintln!("{e:#}\nDefaulting to e4");
            Square::E4
        }
    }
}

fn print_mask(mode: ViewMode, square: Square, include_self: bool, mask: Bitboard) {
    let printer = BitboardPrinter::new(mask).layout(Layout::Board);
    println!("\n{} of {square} ({mask:#018X}):\n{printer}", mode.label());
    if !include_self {
        println!("(excluding {square})");
    }
}

#[macroquad::main("Diagonal Mask Viewer")]
async fn main() {
    let mut selected = parse_args();
    let mut mode = ViewMode::Both;
    let mut include_self = true;
    let mut mask = mode.mask(selected, include_self);
    print_mask(mode, selected, include_self, mask);

    loop {
        // Compute all necessary coordinates and values
        let (center_x, center_y) = (screen_width() / 2., screen_height() / 2.);
        let square_size = screen_height().min(screen_width()) / 16.0;
        let start_x = center_x - (square_size * 4.0);
        let start_y = center_y + (square_size * 3.0);
        let text_size = square_size / 2.0;
        let text_x = center_x;
        let text_y = screen_height() / 12.0;

        // Reset the canvas
        clear_background(GRAY);

        // Draw a chessboard
        for square in Square::iter() {
            let x = start_x + square.file().index() as f32 * square_size;
            let y = start_y - square.rank().index() as f32 * square_size;
            let is_light = (square.file().index() + square.rank().index()) % 2 != 0;
            let text_color = if is_light { BLACK } else { WHITE };

            // Select square color based on whether the square is in the mask
            let color = if square == selected {
                GOLD
            } else if is_light {
                if mask[square] {
                    GREEN
                } else {
                    BEIGE
                }
            } else if mask[square] {
                DARKGREEN
            } else {
                DARKBROWN
            };

            // Draw the square, then its label
            draw_rectangle(x, y, square_size, square_size, color);
            draw_text(
                square.to_string().as_str(),
                x + text_size / 2.0,
                y + text_size + text_size / 4.0,
                text_size,
                text_color,
            );
        }

        let mut changed = false;

        // If the mouse is clicked, select the square clicked
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            let square_x = ((mouse_x - start_x) / square_size).floor();
            let square_y = ((start_y - mouse_y + square_size) / square_size).floor();

            // Negative coordinates fall off the board; `as u8` would saturate them to 0
            if square_x >= 0.0 && square_y >= 0.0 {
                if let (Ok(file), Ok(rank)) = (File::new(square_x as u8), Rank::new(square_y as u8))
                {
                    selected = Square::new(file, rank);
                    changed = true;
                }
            }
        }

        if is_key_pressed(KeyCode::D) {
            mode = ViewMode::Only(MaskKind::Diagonal);
            changed = true;
        }
        if is_key_pressed(KeyCode::A) {
            mode = ViewMode::Only(MaskKind::AntiDiagonal);
            changed = true;
        }
        if is_key_pressed(KeyCode::B) {
            mode = ViewMode::Both;
            changed = true;
        }
        if is_key_pressed(KeyCode::X) {
            include_self = !include_self;
            changed = true;
        }

        if changed {
            mask = mode.mask(selected, include_self);
            print_mask(mode, selected, include_self, mask);
        }

        // Now display the mode and the hex value of the mask
        let caption = format!("{} of {selected} [D/A/B, X]", mode.label());
        let hex_board = format!("{:#018X}", mask);
        draw_centered_text(caption.as_str(), text_x, text_y, text_size * 1.5, WHITE);
        draw_centered_text(
            hex_board.as_str(),
            text_x,
            text_y + text_size * 25.0,
            text_size * 2.0,
            WHITE,
        );

        next_frame().await;
    }
}

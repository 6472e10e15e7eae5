//! Interactive layout explorer: list key rectangles and hit-test points.

use key_layout::{KeyboardLayout, LayoutKind};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              On-screen Keyboard Layout Explorer          ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let mut layout = pick_layout();
    println!("\n  ✓  {} ({} keys)\n", layout.name, layout.keys().count());

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                for (label, r) in layout.keys() {
                    println!("    {:<10} ({:>4},{:>4}) → ({:>4},{:>4})", label, r.x1, r.y1, r.x2, r.y2);
                }
            }
            "2" => {
                let line = read_line("  Point as \"x y\": ");
                let mut parts = line.split_whitespace().map(|s| s.parse::<i32>());
                match (parts.next(), parts.next()) {
                    (Some(Ok(x)), Some(Ok(y))) => match layout.key_at(x, y) {
                        Some(label) => println!("  ({}, {}) → {}", x, y, label),
                        None        => println!("  ({}, {}) → no key", x, y),
                    },
                    _ => println!("  ⚠  expected two integers."),
                }
            }
            "3" => {
                for (r, row) in layout.rows.iter().enumerate() {
                    let offset = layout.key_rect(r, 0).x1 - layout.key_rect(0, 0).x1;
                    let pad = " ".repeat((offset / 15) as usize);
                    println!("    {}{}", pad, row.join("  "));
                }
                println!("    [{}]", layout.special_keys.join("] ["));
            }
            "4" => {
                layout = pick_layout();
                println!("  Switched to {}.", layout.name);
            }
            "q" | "quit" | "exit" => {
                println!("  Bye.");
                break;
            }
            _ => println!("  Unknown command."),
        }
        println!();
    }
}

fn print_ops_menu() {
    println!("  1. List key rectangles");
    println!("  2. Hit-test a point");
    println!("  3. Show layout");
    println!("  4. Switch layout");
    println!("  q. Quit");
}

fn pick_layout() -> &'static KeyboardLayout {
    let names: Vec<&str> = LayoutKind::ALL.iter().map(|k| k.as_str()).collect();
    println!("  Layouts: {}", names.join(", "));
    KeyboardLayout::by_name(read_line("  Layout (default qwerty): ").trim())
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

//! Drive the I/O window from a small access script and print what the CPU
//! would observe. Useful for checking register behaviour against hardware
//! test logs without a full machine.
//!
//! Script lines (hex numbers, `#` starts a comment):
//!
//! ```text
//! w FF51 C0        write
//! r FF55           read
//! hblank 3         deliver hblank signals
//! tick 400         advance the divider
//! press a start    hold buttons (right left up down a b select start)
//! release a
//! boot off         unmap the boot ROM
//! vram 0 20        dump VRAM bytes
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use gbio::{
    lookup, Buttons, Clock, DmaBus, Hardware, Host, InputSource, IoContext, Model, ACCESS_PHASE,
};

/// Stand-in for the rest of the machine: a flat cartridge image, one VRAM
/// bank and a cycle counter.
struct ProbeHost {
    cartridge: Vec<u8>,
    vram: Vec<u8>,
    cycles: u64,
    buttons: Buttons,
    boot_rom: bool,
}

impl Clock for ProbeHost {
    fn advance(&mut self, cycles: u32) {
        self.cycles += cycles as u64;
    }
}

impl InputSource for ProbeHost {
    fn sample(&mut self) -> Buttons {
        self.buttons
    }
}

impl DmaBus for ProbeHost {
    fn dma_read(&mut self, address: u16) -> u8 {
        self.cartridge.get(address as usize).copied().unwrap_or(0xFF)
    }

    fn vram_write(&mut self, offset: u16, value: u8) {
        self.vram[offset as usize & 0x1FFF] = value;
    }
}

impl Host for ProbeHost {
    fn boot_rom_enabled(&self) -> bool {
        self.boot_rom
    }
}

fn parse_hex(token: Option<&str>, what: &str) -> Result<u32> {
    let token = token.ok_or_else(|| anyhow!("missing {what}"))?;
    u32::from_str_radix(token.trim_start_matches("0x"), 16)
        .with_context(|| format!("invalid {what} '{token}'"))
}

fn parse_u16(token: Option<&str>, what: &str) -> Result<u16> {
    let value = parse_hex(token, what)?;
    u16::try_from(value).map_err(|_| anyhow!("{what} {value:#X} out of range"))
}

fn parse_u8(token: Option<&str>, what: &str) -> Result<u8> {
    let value = parse_hex(token, what)?;
    u8::try_from(value).map_err(|_| anyhow!("{what} {value:#X} out of range"))
}

fn parse_button(name: &str) -> Result<Buttons> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "right" => Buttons::RIGHT,
        "left" => Buttons::LEFT,
        "up" => Buttons::UP,
        "down" => Buttons::DOWN,
        "a" => Buttons::A,
        "b" => Buttons::B,
        "select" => Buttons::SELECT,
        "start" => Buttons::START,
        other => bail!("unknown button '{other}'"),
    })
}

fn parse_model(name: &str) -> Result<Model> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "dmg" => Model::Dmg,
        "sgb" => Model::Sgb,
        "cgb" => Model::Cgb,
        other => bail!("unknown model '{other}' (expected dmg, sgb or cgb)"),
    })
}

fn register_name(address: u16) -> &'static str {
    match address {
        0xC000..=0xDFFF => "WRAM",
        0xE000..=0xFDFF => "ECHO",
        0xFF80..=0xFFFE => "HRAM",
        _ => lookup(address).map_or("-", |entry| entry.register.name()),
    }
}

fn run_line(io: &mut IoContext, host: &mut ProbeHost, line: &str) -> Result<()> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(());
    };

    match command {
        "r" | "read" => {
            let address = parse_u16(tokens.next(), "address")?;
            let value = io.read_io(host, ACCESS_PHASE, address, 0xFF);
            println!("{address:04X} {:<5} -> {value:02X}", register_name(address));
        }
        "w" | "write" => {
            let address = parse_u16(tokens.next(), "address")?;
            let value = parse_u8(tokens.next(), "value")?;
            let before = host.cycles;
            io.write_io(host, ACCESS_PHASE, address, value);
            log::debug!("{address:04X} <- {value:02X}");
            if host.cycles != before {
                println!(
                    "{address:04X} {:<5} <- {value:02X} (bus held {} cycles)",
                    register_name(address),
                    host.cycles - before
                );
            }
        }
        "hblank" => {
            let count = match tokens.next() {
                Some(token) => parse_hex(Some(token), "count")?,
                None => 1,
            };
            for _ in 0..count {
                io.hblank(host);
            }
        }
        "tick" => {
            let cycles = parse_hex(tokens.next(), "cycles")?;
            io.tick_divider(cycles);
        }
        "press" | "release" => {
            let mut buttons = Buttons::empty();
            for name in tokens {
                buttons |= parse_button(name)?;
            }
            host.buttons.set(buttons, command == "press");
        }
        "boot" => match tokens.next() {
            Some("on") => host.boot_rom = true,
            Some("off") => host.boot_rom = false,
            other => bail!("expected 'boot on' or 'boot off', got {other:?}"),
        },
        "vram" => {
            let start = parse_u16(tokens.next(), "offset")? as usize & 0x1FFF;
            let len = parse_u16(tokens.next(), "length")? as usize;
            let end = (start + len).min(host.vram.len());
            for (row, chunk) in host.vram[start..end].chunks(16).enumerate() {
                let bytes: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
                println!("{:04X}: {}", 0x8000 + start + row * 16, bytes.join(" "));
            }
        }
        other => bail!("unknown command '{other}'"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let script_path: PathBuf = args.next().map(PathBuf::from).ok_or_else(|| {
        anyhow!("Usage: gbio_probe <script> [dmg|sgb|cgb] [cartridge.gb]")
    })?;
    let model = args.next().as_deref().map_or(Ok(Model::Cgb), parse_model)?;
    let cartridge = match args.next() {
        Some(path) => std::fs::read(&path)
            .with_context(|| format!("failed to read cartridge '{path}'"))?,
        None => (0..0xC000u32).map(|i| i as u8).collect(),
    };

    let script = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script '{}'", script_path.display()))?;

    let mut io = IoContext::new(Hardware::builder().model(model).build());
    let mut host = ProbeHost {
        cartridge,
        vram: vec![0; 0x2000],
        cycles: 0,
        buttons: Buttons::empty(),
        boot_rom: true,
    };
    log::info!("Probing {:?} with '{}'", model, script_path.display());

    for (number, line) in script.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        run_line(&mut io, &mut host, line)
            .with_context(|| format!("{}:{}: '{line}'", script_path.display(), number + 1))?;
    }

    println!(
        "IF={:02X} IE={:02X} cycles={}",
        io.status.interrupt_flag, io.status.interrupt_enable, host.cycles
    );
    Ok(())
}

use gbio::{Buttons, Clock, DmaBus, Hardware, Host, InputSource, Interrupt, IoContext, Model};

#[derive(Default)]
struct Machine {
    rom: Vec<u8>,
    vram: Vec<u8>,
    cycles: u64,
    buttons: Buttons,
    boot_rom: bool,
}

impl Machine {
    fn new() -> Self {
        Self {
            rom: (0..0x8000u32).map(|i| (i * 7) as u8).collect(),
            vram: vec![0; 0x2000],
            boot_rom: true,
            ..Self::default()
        }
    }
}

impl Clock for Machine {
    fn advance(&mut self, cycles: u32) {
        self.cycles += cycles as u64;
    }
}

impl InputSource for Machine {
    fn sample(&mut self) -> Buttons {
        self.buttons
    }
}

impl DmaBus for Machine {
    fn dma_read(&mut self, address: u16) -> u8 {
        self.rom.get(address as usize).copied().unwrap_or(0xFF)
    }

    fn vram_write(&mut self, offset: u16, value: u8) {
        self.vram[offset as usize] = value;
    }
}

impl Host for Machine {
    fn boot_rom_enabled(&self) -> bool {
        self.boot_rom
    }
}

/// Run one full machine cycle (four phases) of a read.
fn cycle_read(io: &mut IoContext, machine: &mut Machine, address: u16) -> u8 {
    let mut data = 0xFF;
    for phase in 0..4 {
        data = io.read_io(machine, phase, address, data);
    }
    data
}

/// Run one full machine cycle (four phases) of a write.
fn cycle_write(io: &mut IoContext, machine: &mut Machine, address: u16, value: u8) {
    for phase in 0..4 {
        io.write_io(machine, phase, address, value);
    }
}

#[test]
fn full_cycle_applies_each_effect_once() {
    let mut io = IoContext::new(Hardware::builder().model(Model::Cgb).build());
    let mut machine = Machine::new();

    cycle_write(&mut io, &mut machine, 0xFF51, 0x00);
    cycle_write(&mut io, &mut machine, 0xFF52, 0x00);
    cycle_write(&mut io, &mut machine, 0xFF53, 0x80);
    cycle_write(&mut io, &mut machine, 0xFF54, 0x00);
    cycle_write(&mut io, &mut machine, 0xFF55, 0x01);

    // Two blocks, once: a second run on another phase would have moved 64 bytes.
    assert_eq!(io.status.dma.source, 0x0020);
    assert_eq!(&machine.vram[..0x20], &machine.rom[..0x20]);
    assert!(machine.vram[0x20..].iter().all(|&b| b == 0));
    assert_eq!(machine.cycles, 4 + 2 * 2);
    assert_eq!(cycle_read(&mut io, &mut machine, 0xFF55), 0xFF);
}

#[test]
fn boot_rom_hands_over_to_a_dmg_cartridge() {
    let mut io = IoContext::new(Hardware::builder().model(Model::Cgb).build());
    let mut machine = Machine::new();

    // Boot ROM selects compatibility mode and then unmaps itself.
    cycle_write(&mut io, &mut machine, 0xFF4C, 0x04);
    machine.boot_rom = false;

    cycle_write(&mut io, &mut machine, 0xFF4C, 0x00);
    assert!(!io.status.cgb_mode, "KEY0 is locked after boot");

    cycle_write(&mut io, &mut machine, 0xFF70, 0x02);
    assert_eq!(cycle_read(&mut io, &mut machine, 0xFF70), 0xFF);
    cycle_write(&mut io, &mut machine, 0xFF55, 0x00);
    assert_eq!(machine.cycles, 0);

    // The DMG-visible registers keep working.
    cycle_write(&mut io, &mut machine, 0xFF00, 0x10);
    machine.buttons = Buttons::START;
    assert_eq!(cycle_read(&mut io, &mut machine, 0xFF00), 0xD7);
    assert!(io.pending().is_empty());
    cycle_write(&mut io, &mut machine, 0xFFFF, Interrupt::JOYPAD.bits());
    assert_eq!(io.pending(), Interrupt::JOYPAD);
}

#[test]
fn program_in_hram_sees_its_own_writes() {
    let mut io = IoContext::new(Hardware::builder().model(Model::Dmg).ram_seed(0xC0DE_1234).build());
    let mut machine = Machine::new();

    for (i, address) in (0xFF80u16..=0xFFFE).enumerate() {
        cycle_write(&mut io, &mut machine, address, i as u8);
    }
    for (i, address) in (0xFF80u16..=0xFFFE).enumerate() {
        assert_eq!(cycle_read(&mut io, &mut machine, address), i as u8);
    }
    assert_eq!(io.hram.as_slice().len(), 127);
}

//! Memory and I/O bus interfaces.

/// Memory bus interface.
///
/// Components access memory through this trait. The bus handles address
/// decoding and routing to the appropriate device. Decoding never faults:
/// unmapped addresses are the bus's business (open bus, ignored writes).
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a little-endian word as two byte reads at `address` and
    /// `address + 1` (wrapping at the top of the address space).
    fn read16(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from(lo) | (u16::from(hi) << 8)
    }

    /// Write a little-endian word as two byte writes, low byte first.
    fn write16(&mut self, address: u16, value: u16) {
        self.write(address, value as u8);
        self.write(address.wrapping_add(1), (value >> 8) as u8);
    }
}

/// A bus that also supports a separate I/O port space.
///
/// The 8080 family has a distinct 8-bit port space reached only through
/// the IN and OUT instructions. Machines built around those CPUs implement
/// this trait on top of [`Bus`].
pub trait IoBus: Bus {
    /// Read a byte from the given I/O port.
    fn read_io(&mut self, port: u8) -> u8;

    /// Write a byte to the given I/O port.
    fn write_io(&mut self, port: u8, value: u8);
}

/// Flat 64 KiB RAM bus with a latched port space.
///
/// Every address is readable and writable, which makes this the fixture of
/// choice for instruction-level tests. Port reads return whatever was last
/// written to (or preset on) that port. Port writes are also recorded in
/// order so tests can assert on OUT traffic.
pub struct SimpleBus {
    ram: Vec<u8>,
    ports: [u8; 256],
    port_writes: Vec<(u8, u8)>,
}

impl SimpleBus {
    /// Create a bus with all memory and ports cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: vec![0; 0x1_0000],
            ports: [0; 256],
            port_writes: Vec::new(),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at 64 KiB.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read memory without going through the bus trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    /// Preset the value an IN instruction will see on `port`.
    pub fn set_port(&mut self, port: u8, value: u8) {
        self.ports[port as usize] = value;
    }

    /// All OUT writes so far, oldest first.
    #[must_use]
    pub fn port_writes(&self) -> &[(u8, u8)] {
        &self.port_writes
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}

impl IoBus for SimpleBus {
    fn read_io(&mut self, port: u8) -> u8 {
        self.ports[port as usize]
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.ports[port as usize] = value;
        self.port_writes.push((port, value));
    }
}

//! Protocol identifier (TP-PID) octet.

/// Indicates interworking and teleservice handling for the message.
///
/// Layout: `pp i ttttt` — PID group (bits 7-6), interworking indicator
/// (bit 5), telematic device type (bits 4-0). The default zero value means
/// "assigned, implicit device".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtocolIdentifier {
    pid: u8,
    indicates: u8,
    device: u8,
}

impl ProtocolIdentifier {
    pub const DEVICE_IMPLICIT: u8 = 0x00;
    pub const DEVICE_TELEX: u8 = 0x01;
    pub const DEVICE_TELEFAX: u8 = 0x02;
    pub const DEVICE_VOICE: u8 = 0x04;
    pub const DEVICE_ERMES: u8 = 0x05;
    pub const DEVICE_PAGING: u8 = 0x06;
    pub const DEVICE_X400: u8 = 0x11;
    pub const DEVICE_EMAIL: u8 = 0x12;

    pub fn from_byte(byte: u8) -> Self {
        let mut pid = ProtocolIdentifier::default();
        pid.set_pid(byte >> 6);
        pid.set_indicates(byte >> 5);
        pid.set_device(byte);
        pid
    }

    pub fn pid(&self) -> u8 {
        self.pid
    }

    pub fn set_pid(&mut self, pid: u8) {
        self.pid = pid & 0x03;
    }

    pub fn indicates(&self) -> u8 {
        self.indicates
    }

    pub fn set_indicates(&mut self, indicates: u8) {
        self.indicates = indicates & 0x01;
    }

    pub fn device(&self) -> u8 {
        self.device
    }

    pub fn set_device(&mut self, device: u8) {
        self.device = device & 0x1F;
    }

    pub fn value(&self) -> u8 {
        (self.pid << 6) | (self.indicates << 5) | self.device
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}", self.value())
    }
}

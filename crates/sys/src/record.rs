use bitflags::bitflags;

bitflags! {
    /// Which fields of a [`StatusRecord`] the kernel actually filled in.
    ///
    /// Bit values match the kernel's `STATX_*` result mask. A cleared bit
    /// means "unknown", never "zero".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMask: u32 {
        const TYPE   = 0x0001;
        const MODE   = 0x0002;
        const NLINK  = 0x0004;
        const UID    = 0x0008;
        const GID    = 0x0010;
        const ATIME  = 0x0020;
        const MTIME  = 0x0040;
        const CTIME  = 0x0080;
        const INO    = 0x0100;
        const SIZE   = 0x0200;
        const BLOCKS = 0x0400;
        const BTIME  = 0x0800;

        /// Everything `stat(2)` can report.
        const BASIC = 0x07ff;
        /// Basic stats plus birth time.
        const ALL = 0x0fff;
    }
}

bitflags! {
    /// Filesystem attribute bits, matching the kernel's `STATX_ATTR_*`.
    ///
    /// Only the five attributes below are given letters in the report; any
    /// further bits the kernel sets are retained and shown in the hex value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u64 {
        /// File is compressed by the filesystem.
        const COMPRESSED = 0x0004;
        /// File is marked immutable.
        const IMMUTABLE = 0x0010;
        /// File is append-only.
        const APPEND = 0x0020;
        /// File is not to be dumped.
        const NODUMP = 0x0040;
        /// File requires a key to decrypt in the filesystem.
        const ENCRYPTED = 0x0800;

        const _ = !0;
    }
}

/// Seconds-plus-nanoseconds timestamp as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: u32,
}

/// Device identifier split into its major and minor halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    pub major: u32,
    pub minor: u32,
}

impl DeviceId {
    /// Combine major and minor into the kernel's `dev_t` encoding.
    ///
    /// Same layout glibc's `makedev` produces: the low 12 major bits sit at
    /// bit 8, the low 8 minor bits at bit 0, with the overflow of each half
    /// packed higher up.
    pub fn combined(self) -> u64 {
        let major = u64::from(self.major);
        let minor = u64::from(self.minor);

        ((major & 0x0000_0fff) << 8)
            | ((major & 0xffff_f000) << 32)
            | (minor & 0x0000_00ff)
            | ((minor & 0xffff_ff00) << 12)
    }
}

const TYPE_BITS: u16 = 0o170000;

/// File type decoded from the `S_IFMT` bits of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Fifo,
    CharDevice,
    Directory,
    BlockDevice,
    Regular,
    Symlink,
    Socket,
    /// Type bits the decoder does not recognize, kept raw for display.
    Unknown(u16),
}

impl FileType {
    pub fn from_mode(mode: u16) -> FileType {
        match mode & TYPE_BITS {
            0o010000 => FileType::Fifo,
            0o020000 => FileType::CharDevice,
            0o040000 => FileType::Directory,
            0o060000 => FileType::BlockDevice,
            0o100000 => FileType::Regular,
            0o120000 => FileType::Symlink,
            0o140000 => FileType::Socket,
            other => FileType::Unknown(other),
        }
    }

    pub fn is_device(self) -> bool {
        matches!(self, FileType::BlockDevice | FileType::CharDevice)
    }
}

/// Decoded metadata for one file at one point in time.
///
/// Built once per queried path and consumed once by the report renderer.
/// Raw fields are only meaningful when the corresponding [`FieldMask`] bit is
/// set; the accessor methods enforce that gating and are what the renderer
/// goes through.
#[derive(Debug, Clone)]
pub struct StatusRecord {
    pub mask: FieldMask,
    /// Preferred I/O block size. Always valid.
    pub block_size: u32,
    pub size: u64,
    pub blocks: u64,
    pub mode: u16,
    pub inode: u64,
    pub link_count: u32,
    pub uid: u32,
    pub gid: u32,
    pub atime: Timestamp,
    pub btime: Timestamp,
    pub ctime: Timestamp,
    pub mtime: Timestamp,
    /// Device containing the file. Always valid.
    pub device: DeviceId,
    /// Device this file represents; meaningful only for block/char devices.
    pub rdev: DeviceId,
    /// Attribute bits currently set on the file.
    pub attributes: AttrFlags,
    /// Attribute bits the filesystem is able to report. Empty means the
    /// whole attributes line is unavailable.
    pub attributes_mask: AttrFlags,
}

impl StatusRecord {
    pub fn size(&self) -> Option<u64> {
        self.mask.contains(FieldMask::SIZE).then_some(self.size)
    }

    pub fn blocks(&self) -> Option<u64> {
        self.mask.contains(FieldMask::BLOCKS).then_some(self.blocks)
    }

    pub fn file_type(&self) -> Option<FileType> {
        self.mask
            .contains(FieldMask::TYPE)
            .then(|| FileType::from_mode(self.mode))
    }

    /// Permission and type bits, without the gating applied to the type
    /// decoding above.
    pub fn mode_bits(&self) -> Option<u16> {
        self.mask.contains(FieldMask::MODE).then_some(self.mode)
    }

    pub fn inode(&self) -> Option<u64> {
        self.mask.contains(FieldMask::INO).then_some(self.inode)
    }

    pub fn link_count(&self) -> Option<u32> {
        self.mask
            .contains(FieldMask::NLINK)
            .then_some(self.link_count)
    }

    pub fn uid(&self) -> Option<u32> {
        self.mask.contains(FieldMask::UID).then_some(self.uid)
    }

    pub fn gid(&self) -> Option<u32> {
        self.mask.contains(FieldMask::GID).then_some(self.gid)
    }

    pub fn atime(&self) -> Option<Timestamp> {
        self.mask.contains(FieldMask::ATIME).then_some(self.atime)
    }

    pub fn mtime(&self) -> Option<Timestamp> {
        self.mask.contains(FieldMask::MTIME).then_some(self.mtime)
    }

    pub fn ctime(&self) -> Option<Timestamp> {
        self.mask.contains(FieldMask::CTIME).then_some(self.ctime)
    }

    pub fn btime(&self) -> Option<Timestamp> {
        self.mask.contains(FieldMask::BTIME).then_some(self.btime)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;

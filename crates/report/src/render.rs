use chrono::{Local, TimeZone};

use statx_sys::{AttrFlags, FileType, NameLookup, StatusRecord, Timestamp};

/// Permission triplets indexed by a 3-bit rwx group.
const PERM_TRIPLETS: [&str; 8] = ["---", "--x", "-w-", "-wx", "r--", "r-x", "rw-", "rwx"];

/// Attribute letters in display order. A letter renders as itself when the
/// attribute is set, `-` when supported but clear, and `.` when the
/// filesystem cannot report it at all.
const ATTR_LETTERS: [(char, AttrFlags); 5] = [
    ('c', AttrFlags::COMPRESSED),
    ('i', AttrFlags::IMMUTABLE),
    ('a', AttrFlags::APPEND),
    ('d', AttrFlags::NODUMP),
    ('e', AttrFlags::ENCRYPTED),
];

/// Render one status record as a `stat(1)`-style multi-line report.
///
/// Pure function of its inputs: every optional field is gated on the
/// record's populated mask, so rendering a valid record cannot fail. Owner
/// and group names come pre-resolved through `names`; a failed lookup falls
/// back to the numeric id.
pub fn render_status(path: &str, rec: &StatusRecord, names: &dyn NameLookup) -> String {
    let mut out = String::new();

    out.push_str(&format!("  File: '{path}'\n"));

    // Size / blocks / IO block / file type.
    out.push(' ');
    if let Some(size) = rec.size() {
        out.push_str(&format!(" Size: {size:<15}"));
    }
    if let Some(blocks) = rec.blocks() {
        out.push_str(&format!(" Blocks: {blocks:<10}"));
    }
    out.push_str(&format!(" IO Block: {:<6}", rec.block_size));
    let glyph = match rec.file_type() {
        Some(ft) => {
            push_type_phrase(&mut out, ft);
            type_glyph(ft)
        }
        None => {
            out.push_str(" no type");
            '?'
        }
    };
    out.push('\n');

    // Device / inode / links, plus the represented device for device nodes.
    let dev = rec.device.combined();
    out.push_str(&format!("Device: {:<15}", format!("{dev:x}h/{dev}d")));
    if let Some(inode) = rec.inode() {
        out.push_str(&format!(" Inode: {inode:<11}"));
    }
    if let Some(links) = rec.link_count() {
        out.push_str(&format!(" Links: {links:<5}"));
    }
    if rec.file_type().is_some_and(FileType::is_device) {
        out.push_str(&format!(
            " Device type: {},{}",
            rec.rdev.major, rec.rdev.minor
        ));
    }
    out.push('\n');

    // Access mode and ownership.
    if let Some(mode) = rec.mode_bits() {
        out.push_str(&format!(
            "Access: ({:04o}/{}{}{}{})  ",
            mode & 0o7777,
            glyph,
            PERM_TRIPLETS[usize::from((mode >> 6) & 0o7)],
            PERM_TRIPLETS[usize::from((mode >> 3) & 0o7)],
            PERM_TRIPLETS[usize::from(mode & 0o7)],
        ));
    }
    if let Some(uid) = rec.uid() {
        match names.user_name(uid) {
            Some(name) => out.push_str(&format!("Uid: ({uid:5}/{name:>8})   ")),
            None => out.push_str(&format!("Uid: {uid:5}   ")),
        }
    }
    if let Some(gid) = rec.gid() {
        match names.group_name(gid) {
            Some(name) => out.push_str(&format!("Gid: ({gid:5}/{name:>8})")),
            None => out.push_str(&format!("Gid: {gid:5}")),
        }
    }
    out.push('\n');

    // Timestamps. Birth is omitted entirely when the kernel did not report
    // it; its label carries a leading space so the colons line up.
    if let Some(ts) = rec.atime() {
        out.push_str(&format!("Access: {}\n", format_timestamp(ts)));
    }
    if let Some(ts) = rec.mtime() {
        out.push_str(&format!("Modify: {}\n", format_timestamp(ts)));
    }
    if let Some(ts) = rec.ctime() {
        out.push_str(&format!("Change: {}\n", format_timestamp(ts)));
    }
    if let Some(ts) = rec.btime() {
        out.push_str(&format!(" Birth: {}\n", format_timestamp(ts)));
    }

    // Attribute flags, only when the filesystem reports any at all.
    if !rec.attributes_mask.is_empty() {
        out.push_str(&format!(" Attrs: {:016x} (", rec.attributes.bits()));
        for (letter, flag) in ATTR_LETTERS {
            if !rec.attributes_mask.contains(flag) {
                out.push('.');
            } else if rec.attributes.contains(flag) {
                out.push(letter);
            } else {
                out.push('-');
            }
        }
        out.push_str(")\n");
    }

    out
}

fn push_type_phrase(out: &mut String, ft: FileType) {
    match ft {
        FileType::Fifo => out.push_str(" FIFO"),
        FileType::CharDevice => out.push_str(" character special file"),
        FileType::Directory => out.push_str(" directory"),
        FileType::BlockDevice => out.push_str(" block special file"),
        FileType::Regular => out.push_str(" regular file"),
        FileType::Symlink => out.push_str(" symbolic link"),
        FileType::Socket => out.push_str(" socket"),
        FileType::Unknown(bits) => out.push_str(&format!(" unknown type ({bits:o})")),
    }
}

fn type_glyph(ft: FileType) -> char {
    match ft {
        FileType::Fifo => 'p',
        FileType::CharDevice => 'c',
        FileType::Directory => 'd',
        FileType::BlockDevice => 'b',
        FileType::Regular => '-',
        FileType::Symlink => 'l',
        FileType::Socket => 's',
        FileType::Unknown(_) => '?',
    }
}

fn format_timestamp(ts: Timestamp) -> String {
    match Local.timestamp_opt(ts.secs, ts.nanos).earliest() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.9f %z").to_string(),
        // Out of chrono's calendar range; show the raw epoch pair.
        None => format!("@{}.{:09}", ts.secs, ts.nanos),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

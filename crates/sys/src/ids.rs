use log::debug;

/// Resolve numeric owner/group ids to display names.
///
/// Resolution is best-effort: `None` means "render the numeric id only" and
/// is never an error. The trait seam lets the renderer be exercised with a
/// fixed table instead of the host identity database.
pub trait NameLookup {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Lookup against the host identity database.
pub struct SystemNames;

impl NameLookup for SystemNames {
    fn user_name(&self, uid: u32) -> Option<String> {
        let user = users::get_user_by_uid(uid);
        if user.is_none() {
            debug!("no passwd entry for uid {uid}");
        }
        user.map(|u| u.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        let group = users::get_group_by_gid(gid);
        if group.is_none() {
            debug!("no group entry for gid {gid}");
        }
        group.map(|g| g.name().to_string_lossy().into_owned())
    }
}

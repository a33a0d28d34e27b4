pub(crate) mod bundle;
pub(crate) mod entries;
pub(crate) mod list;
pub(crate) mod qualifiers;
pub(crate) mod resolve;

pub(crate) use entries::command_entries;
pub(crate) use list::command_list;
pub(crate) use qualifiers::command_qualifiers;
pub(crate) use resolve::command_resolve;

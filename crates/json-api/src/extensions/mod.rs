//! Extension traits

mod current_user;
mod depot;
mod result;

pub(crate) use current_user::CurrentUserExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;

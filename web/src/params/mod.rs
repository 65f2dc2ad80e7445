pub(crate) mod accepts_incomplete;

//! Account and dream journal adapters

mod supabase;

pub use supabase::SupabaseClient;

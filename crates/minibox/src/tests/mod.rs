mod arbitrary;

mod containers;

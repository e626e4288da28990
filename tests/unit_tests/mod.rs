mod algebra;
mod deformed_point;

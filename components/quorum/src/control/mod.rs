mod control;

#[cfg(test)]
mod test_control;

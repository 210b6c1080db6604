use nom::{
    bytes::complete::take_while_m_n, character::complete::char, combinator::map_res,
    sequence::preceded, IResult,
};

pub type ParserInput<'a> = &'a str;
pub type ParserResult<'a, T> = IResult<ParserInput<'a>, T>;

/// Exactly `width` ASCII digits.
pub fn digits<'a>(width: usize) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, u32> {
    map_res(
        take_while_m_n(width, width, |c: char| c.is_ascii_digit()),
        str::parse::<u32>,
    )
}

/// `sep` followed by exactly two digits.
pub fn field<'a>(sep: char) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, u32> {
    preceded(char(sep), digits(2))
}
